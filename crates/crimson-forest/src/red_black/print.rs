use std::fmt::Debug;

use super::types::RbNode;

/// Debug printer for red-black trees.
pub fn print<K, V>(arena: &[RbNode<K, V>], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let color = if n.red { "red" } else { "black" };
            let left = print(arena, n.l, &format!("{tab}  "));
            let right = print(arena, n.r, &format!("{tab}  "));
            format!(
                "Node[{i}] {color} {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.k, n.v
            )
        }
    }
}
