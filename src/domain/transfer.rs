// ==========================================
// 牧场载畜平衡系统 - 调拨领域模型
// ==========================================
// 职责: 调拨候选、成本/收益拆分、ROI 结论、调拨建议、平衡报告
// 红线: 所有对象均为建议，不直接修改存栏
// ==========================================

use crate::domain::assessment::{CapacityAssessment, ImbalanceRecord};
use crate::domain::types::{RoiTier, SystemStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// TransferCandidate - 调拨候选
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferCandidate {
    pub origin_id: String,
    pub destination_id: String,
    pub category: String,
    pub head_count: u32,
    pub au_factor: f64,
    pub au_moved: f64,    // head_count × au_factor
    pub distance_km: f64,
}

// ==========================================
// CostBreakdown - 调拨成本拆分
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub transport: f64,
    pub handling: f64,
    pub medical: f64,
    pub administrative: f64,
    pub total: f64,
    pub per_head: f64,
    pub details: CostDetails,
}

/// 成本明细说明 (可读文本)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDetails {
    pub transport: String,
    pub handling: String,
    pub medical: String,
}

// ==========================================
// BenefitBreakdown - 调拨收益拆分 (年化)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitBreakdown {
    pub overload_relief: f64,     // 超载损失规避
    pub pasture_utilization: f64, // 闲置草场利用
    pub optimization: f64,        // 资源优化
    pub annual_total: f64,
    pub monthly_total: f64,
}

// ==========================================
// RoiResult - ROI 结论
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub cost_total: f64,
    pub benefit_annual: f64,
    pub roi_pct: f64,
    pub payback_months: f64,
    pub accept: bool,
    pub tier: RoiTier,
}

// ==========================================
// 可行性校验
// ==========================================

/// 不可行原因
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    /// 调出 AU 超过起点当前载畜量
    ExceedsOriginLoad { au_moved: f64, origin_load: f64 },
    /// 起点没有该类别存栏
    CategoryAbsent { category: String },
    /// 超过该类别存栏的最大调出比例
    ExceedsCategoryShare { head_count: u32, max_heads: u32 },
    /// 终点调入后超过利用率上限
    DestinationOverCeiling { utilization_after: f64, ceiling: f64 },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::ExceedsOriginLoad { au_moved, origin_load } => write!(
                f,
                "EXCEEDS_ORIGIN_LOAD(au_moved={:.2}, origin_load={:.2})",
                au_moved, origin_load
            ),
            RejectionReason::CategoryAbsent { category } => {
                write!(f, "CATEGORY_ABSENT({})", category)
            }
            RejectionReason::ExceedsCategoryShare { head_count, max_heads } => write!(
                f,
                "EXCEEDS_CATEGORY_SHARE(head_count={}, max_heads={})",
                head_count, max_heads
            ),
            RejectionReason::DestinationOverCeiling { utilization_after, ceiling } => write!(
                f,
                "DESTINATION_OVER_CEILING(utilization_after={:.1}, ceiling={:.1})",
                utilization_after, ceiling
            ),
        }
    }
}

/// 可行性校验结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViabilityCheck {
    pub viable: bool,
    pub rejection: Option<RejectionReason>,
    pub origin_utilization_after: f64,
    pub destination_utilization_after: f64,
    pub origin_relief_pts: f64,      // 起点利用率下降 (百分点)
    pub destination_increase_pts: f64, // 终点利用率上升 (百分点)
}

// ==========================================
// PropertyShift - 单个牧场调拨前后对比
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyShift {
    pub property_id: String,
    pub property_name: String,
    pub au_before: f64,
    pub au_after: f64,
    pub utilization_before: f64,
    pub utilization_after: f64,
}

// ==========================================
// TransferEvaluation - 指定调拨方案评估
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferEvaluation {
    pub origin: PropertyShift,
    pub destination: PropertyShift,
    pub candidate: TransferCandidate,
    pub viability: ViabilityCheck,
    pub cost: CostBreakdown,
    pub benefit: BenefitBreakdown,
    pub roi: RoiResult,
    pub verdict: String,
}

// ==========================================
// TransferRecommendation - 调拨建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecommendation {
    pub recommendation_id: String,
    pub origin_id: String,
    pub origin_name: String,
    pub destination_id: String,
    pub destination_name: String,
    pub category: String,
    pub quantity: u32,
    pub au_moved: f64,
    pub distance_km: f64,
    pub cost: CostBreakdown,
    pub benefit: BenefitBreakdown,
    pub roi: RoiResult,
    pub viability: ViabilityCheck,
    pub priority: f64,          // 0-100
    pub estimated_benefit: f64, // 快速估算 (排序展示用)
    pub reason: String,
    pub verdict: String,
}

// ==========================================
// BalanceReport - 牧场主全局平衡报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub owner_id: String,
    pub generated_at: NaiveDateTime,
    pub total_properties: usize,
    pub total_au_load: f64,
    pub total_au_capacity: f64,
    pub mean_utilization_pct: f64,
    pub system_status: SystemStatus,
    pub system_status_label: String,
    pub assessments: Vec<CapacityAssessment>,
    pub imbalances: Vec<ImbalanceRecord>,
    pub alerts: Vec<String>,
    pub recommendations: Vec<TransferRecommendation>,
    pub skipped: Vec<SkippedProperty>,
}

/// 因数据缺失被跳过的牧场
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedProperty {
    pub property_id: String,
    pub reason: String,
}
