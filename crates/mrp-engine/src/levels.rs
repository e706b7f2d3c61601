//! 低階碼計算
//!
//! 低階碼（LLC）= 自任一頂層組件到該料號的最長路徑深度，決定
//! 淨算的處理順序。層級計算使用全部 BOM 邊（含已失效者），讓
//! 低階碼不隨邊的生效區間漂移。

use mrp_core::{Bom, MrpError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// 低階碼指派器
pub struct LevelAssigner;

impl LevelAssigner {
    /// 指派低階碼
    ///
    /// 頂層組件（只當父件、從不當子件的料號）起始為 0，反覆對
    /// 每條邊做 `llc(c) = max(llc(c), llc(p) + 1)` 鬆弛，直到一趟
    /// 無任何變化（不動點）。合法資料最多 N 趟收斂；若 N+1 趟
    /// 仍在變化，表示 BOM 有自頂層可達的循環，以最後變化的最小
    /// 料號為見證回報 `CyclicBom`。
    ///
    /// 不在 BOM 上的庫存料號一律補在第 0 階。
    pub fn assign(
        bom: &Bom,
        stock_parts: impl IntoIterator<Item = String>,
    ) -> Result<BTreeMap<String, u32>> {
        let edges = bom.edges();

        let mut parts: BTreeSet<&str> = BTreeSet::new();
        let mut children: BTreeSet<&str> = BTreeSet::new();
        for edge in edges {
            parts.insert(edge.parent_id.as_str());
            parts.insert(edge.child_id.as_str());
            children.insert(edge.child_id.as_str());
        }

        // 頂層組件：當過父件但從未當過子件
        let mut levels: BTreeMap<String, u32> = parts
            .iter()
            .filter(|p| !children.contains(*p))
            .map(|p| (p.to_string(), 0))
            .collect();

        let part_count = parts.len();
        let mut converged = parts.is_empty();
        let mut witness = String::new();

        for _pass in 0..=part_count {
            let mut changed: Option<String> = None;

            for edge in edges {
                let Some(parent_level) = levels.get(edge.parent_id.as_str()).copied() else {
                    continue;
                };
                let candidate = parent_level + 1;
                if levels
                    .get(edge.child_id.as_str())
                    .map_or(true, |&current| candidate > current)
                {
                    levels.insert(edge.child_id.clone(), candidate);
                    // 見證料號取本趟變化中最小者，讓錯誤輸出可重現
                    let smaller = match &changed {
                        Some(w) => edge.child_id < *w,
                        None => true,
                    };
                    if smaller {
                        changed = Some(edge.child_id.clone());
                    }
                }
            }

            match changed {
                None => {
                    converged = true;
                    break;
                }
                Some(w) => witness = w,
            }
        }

        if !converged {
            return Err(MrpError::CyclicBom(witness));
        }

        // 剩餘庫存料號補在第 0 階
        for part in stock_parts {
            levels.entry(part).or_insert(0);
        }

        Ok(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrp_core::BomEdge;
    use rust_decimal::Decimal;

    fn edge(parent: &str, child: &str) -> BomEdge {
        BomEdge::new(parent, child, Decimal::ONE)
    }

    #[test]
    fn test_chain_depth() {
        // A → B → C：深度遞增
        let bom = Bom::new(vec![edge("A", "B"), edge("B", "C")]);
        let levels = LevelAssigner::assign(&bom, []).unwrap();

        assert_eq!(levels["A"], 0);
        assert_eq!(levels["B"], 1);
        assert_eq!(levels["C"], 2);
    }

    #[test]
    fn test_diamond_takes_longest_path() {
        // A → B → D 與 A → D 並存：D 取最長路徑 2
        let bom = Bom::new(vec![edge("A", "B"), edge("A", "D"), edge("B", "D")]);
        let levels = LevelAssigner::assign(&bom, []).unwrap();

        assert_eq!(levels["A"], 0);
        assert_eq!(levels["B"], 1);
        assert_eq!(levels["D"], 2);
    }

    #[test]
    fn test_shared_component_under_two_tops() {
        // 兩個頂層共用子件：深者勝
        let bom = Bom::new(vec![
            edge("TOP1", "MID"),
            edge("MID", "SHARED"),
            edge("TOP2", "SHARED"),
        ]);
        let levels = LevelAssigner::assign(&bom, []).unwrap();

        assert_eq!(levels["TOP1"], 0);
        assert_eq!(levels["TOP2"], 0);
        assert_eq!(levels["SHARED"], 2);
    }

    #[test]
    fn test_stock_items_fill_level_zero() {
        let bom = Bom::new(vec![edge("A", "B")]);
        let levels =
            LevelAssigner::assign(&bom, ["LOOSE".to_string(), "B".to_string()]).unwrap();

        // 不在 BOM 的料號補 0 階；已在 BOM 的不被覆蓋
        assert_eq!(levels["LOOSE"], 0);
        assert_eq!(levels["B"], 1);
    }

    #[test]
    fn test_reachable_cycle_is_rejected() {
        // A → B → C → B：自頂層可達的循環必須回報
        let bom = Bom::new(vec![edge("A", "B"), edge("B", "C"), edge("C", "B")]);
        let err = LevelAssigner::assign(&bom, []).unwrap_err();

        assert!(matches!(err, MrpError::CyclicBom(_)));
    }

    #[test]
    fn test_self_loop_is_rejected() {
        let bom = Bom::new(vec![edge("A", "B"), edge("B", "B")]);
        let err = LevelAssigner::assign(&bom, []).unwrap_err();

        match err {
            MrpError::CyclicBom(witness) => assert_eq!(witness, "B"),
            other => panic!("非預期錯誤: {other:?}"),
        }
    }

    #[test]
    fn test_isolated_cycle_falls_to_level_zero() {
        // 無頂層可達的孤立循環不會進入鬆弛，成員以庫存料號補 0 階
        let bom = Bom::new(vec![edge("X", "Y"), edge("Y", "X")]);
        let levels =
            LevelAssigner::assign(&bom, ["X".to_string(), "Y".to_string()]).unwrap();

        assert_eq!(levels["X"], 0);
        assert_eq!(levels["Y"], 0);
    }

    #[test]
    fn test_empty_bom() {
        let bom = Bom::new(Vec::new());
        let levels = LevelAssigner::assign(&bom, ["A".to_string()]).unwrap();

        assert_eq!(levels.len(), 1);
        assert_eq!(levels["A"], 0);
    }
}
