//! 每次運行獨占的工作集
//!
//! 以料號為鍵的記憶體有序映射。運行建立時取得所有權、離開任何
//! 路徑（成功、錯誤、取消）即隨所有權釋放；兩次運行絕不共享。

use mrp_core::{LevelRecord, PlannedOrder, Requirement, Supply};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 需求工作集
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementSet {
    by_part: BTreeMap<String, Vec<Requirement>>,
}

impl RequirementSet {
    /// 創建空集
    pub fn new() -> Self {
        Self::default()
    }

    /// 寫入一筆需求
    pub fn push(&mut self, requirement: Requirement) {
        self.by_part
            .entry(requirement.part_id.clone())
            .or_default()
            .push(requirement);
    }

    /// 是否有該料號的需求
    pub fn contains(&self, part_id: &str) -> bool {
        self.by_part.contains_key(part_id)
    }

    /// 取走該料號的全部需求（淨算期間獨占處理）
    pub fn remove_part(&mut self, part_id: &str) -> Vec<Requirement> {
        self.by_part.remove(part_id).unwrap_or_default()
    }

    /// 寫回該料號的需求殘量（供稽核快照）
    pub fn restore_part(&mut self, part_id: &str, requirements: Vec<Requirement>) {
        if !requirements.is_empty() {
            self.by_part.insert(part_id.to_string(), requirements);
        }
    }

    /// 全部料號（升冪）
    pub fn parts(&self) -> impl Iterator<Item = &String> {
        self.by_part.keys()
    }

    /// 某料號的需求（唯讀）
    pub fn for_part(&self, part_id: &str) -> &[Requirement] {
        self.by_part.get(part_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 總筆數
    pub fn len(&self) -> usize {
        self.by_part.values().map(Vec::len).sum()
    }

    /// 是否為空
    pub fn is_empty(&self) -> bool {
        self.by_part.is_empty()
    }
}

/// 供應工作集
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplySet {
    by_part: BTreeMap<String, Vec<Supply>>,
}

impl SupplySet {
    /// 創建空集
    pub fn new() -> Self {
        Self::default()
    }

    /// 寫入一筆供應
    pub fn push(&mut self, supply: Supply) {
        self.by_part
            .entry(supply.part_id.clone())
            .or_default()
            .push(supply);
    }

    /// 是否有該料號的供應
    pub fn contains(&self, part_id: &str) -> bool {
        self.by_part.contains_key(part_id)
    }

    /// 取走該料號的全部供應
    pub fn remove_part(&mut self, part_id: &str) -> Vec<Supply> {
        self.by_part.remove(part_id).unwrap_or_default()
    }

    /// 寫回該料號的供應殘量（含建議改期標記）
    pub fn restore_part(&mut self, part_id: &str, supplies: Vec<Supply>) {
        if !supplies.is_empty() {
            self.by_part.insert(part_id.to_string(), supplies);
        }
    }

    /// 全部料號（升冪）
    pub fn parts(&self) -> impl Iterator<Item = &String> {
        self.by_part.keys()
    }

    /// 某料號的供應（唯讀）
    pub fn for_part(&self, part_id: &str) -> &[Supply] {
        self.by_part.get(part_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 總筆數
    pub fn len(&self) -> usize {
        self.by_part.values().map(Vec::len).sum()
    }

    /// 是否為空
    pub fn is_empty(&self) -> bool {
        self.by_part.is_empty()
    }
}

/// 計劃訂單工作集（保留產生順序）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannedOrderSet {
    orders: Vec<PlannedOrder>,
}

impl PlannedOrderSet {
    /// 創建空集
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一批計劃訂單
    pub fn extend(&mut self, orders: impl IntoIterator<Item = PlannedOrder>) {
        self.orders.extend(orders);
    }

    /// 全部計劃訂單（產生順序）
    pub fn orders(&self) -> &[PlannedOrder] {
        &self.orders
    }

    /// 某料號的計劃訂單
    pub fn for_part<'a>(&'a self, part_id: &'a str) -> impl Iterator<Item = &'a PlannedOrder> {
        self.orders.iter().filter(move |o| o.part_id == part_id)
    }

    /// 張數
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// 是否為空
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// 計劃總量
    pub fn total_quantity(&self) -> Decimal {
        self.orders.iter().map(|o| o.quantity).sum()
    }
}

/// 層級表
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelTable {
    records: BTreeMap<String, LevelRecord>,
}

impl LevelTable {
    /// 創建空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 寫入一筆層級記錄（同料號覆蓋）
    pub fn insert(&mut self, record: LevelRecord) {
        self.records.insert(record.part_id.clone(), record);
    }

    /// 查找層級記錄
    pub fn get(&self, part_id: &str) -> Option<&LevelRecord> {
        self.records.get(part_id)
    }

    /// 是否已有該料號
    pub fn contains(&self, part_id: &str) -> bool {
        self.records.contains_key(part_id)
    }

    /// 最大低階碼（空表為 0）
    pub fn max_llc(&self) -> u32 {
        self.records.values().map(|r| r.llc).max().unwrap_or(0)
    }

    /// 某低階碼的全部層級記錄（依料號升冪）
    pub fn records_at_level(&self, llc: u32) -> Vec<LevelRecord> {
        self.records
            .values()
            .filter(|r| r.llc == llc)
            .cloned()
            .collect()
    }

    /// 筆數
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 是否為空
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 一次運行獨占的全部工作集
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkingSets {
    /// 需求
    pub requirements: RequirementSet,

    /// 供應
    pub supplies: SupplySet,

    /// 計劃訂單
    pub planned_orders: PlannedOrderSet,

    /// 層級表
    pub levels: LevelTable,
}

impl WorkingSets {
    /// 創建空的工作集
    pub fn new() -> Self {
        Self::default()
    }
}
