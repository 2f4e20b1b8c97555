//! # 展示文本格式化
//!
//! 金额单位为卢比：
//! - 十万（lakh）及以上显示为 `₹{x}L`，保留一位小数
//! - 以下显示为 `₹{x}K`，取整

/// 一个 lakh（十万）
pub const LAKH: u64 = 100_000;

/// 单笔金额的展示文本
///
/// # 示例
/// - `500000` → `₹5.0L`
/// - `50000` → `₹50K`
pub fn format_amount(amount: u64) -> String {
    if amount >= LAKH {
        format!("₹{:.1}L", amount as f64 / LAKH as f64)
    } else {
        format!("₹{:.0}K", amount as f64 / 1000.0)
    }
}

/// 协作者页面的总投资额展示文本，如 `₹5.0L+`
pub fn format_total_investment(total: u64) -> String {
    format!("₹{:.1}L+", total as f64 / LAKH as f64)
}
