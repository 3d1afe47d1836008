// 四叉树算法模块
//
// 按功能分解为不同的子模块：
// - insert: 插入与节点细分
// - search: 范围查询与细节层次查询
// - export: 树结构导出（用于可视化）

pub mod export;
pub mod insert;
pub mod search;
