// ==========================================
// 牧场载畜平衡系统 - 失衡识别引擎
// ==========================================
// 职责: 扫描牧场主全部牧场评估，标记超载/闲置
// 红线: 只产出建议文本，不修改存栏
// ==========================================

use crate::config::EngineConfig;
use crate::domain::assessment::{CapacityAssessment, ImbalanceRecord};
use crate::domain::types::{CapacityStatus, ImbalanceType, Severity};
use crate::i18n::t_with_args;
use std::sync::Arc;
use tracing::debug;

// ==========================================
// ImbalanceDetector - 失衡识别引擎
// ==========================================
pub struct ImbalanceDetector {
    config: Arc<EngineConfig>,
}

impl ImbalanceDetector {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 识别失衡牧场
    ///
    /// - OVERLOADED -> OVERLOAD，利用率 > 110% 为 HIGH，否则 MEDIUM
    /// - UNDERUSED -> UNDERUSE，固定 MEDIUM
    /// - HIGH / ADEQUATE 不产出记录
    ///
    /// 输出顺序与输入一致
    pub fn detect(&self, assessments: &[CapacityAssessment]) -> Vec<ImbalanceRecord> {
        let records: Vec<ImbalanceRecord> = assessments
            .iter()
            .filter_map(|a| self.inspect(a))
            .collect();

        debug!(
            properties = assessments.len(),
            imbalances = records.len(),
            "失衡识别完成"
        );

        records
    }

    /// 单个牧场的失衡判定
    pub fn inspect(&self, assessment: &CapacityAssessment) -> Option<ImbalanceRecord> {
        match assessment.status {
            CapacityStatus::Overloaded => {
                let au = assessment.au_surplus;
                Some(ImbalanceRecord {
                    property_id: assessment.property_id.clone(),
                    property_name: assessment.property_name.clone(),
                    imbalance_type: ImbalanceType::Overload,
                    severity: self.overload_severity(assessment.utilization_pct),
                    utilization_pct: assessment.utilization_pct,
                    au_amount: au,
                    suggested_action: t_with_args(
                        "imbalance.overload_action",
                        &[("au", &format!("{}", au.floor() as i64))],
                    ),
                })
            }
            CapacityStatus::Underused => {
                let au = assessment.au_available;
                Some(ImbalanceRecord {
                    property_id: assessment.property_id.clone(),
                    property_name: assessment.property_name.clone(),
                    imbalance_type: ImbalanceType::Underuse,
                    severity: Severity::Medium,
                    utilization_pct: assessment.utilization_pct,
                    au_amount: au,
                    suggested_action: t_with_args(
                        "imbalance.underuse_action",
                        &[("au", &format!("{}", (au * 0.5).floor() as i64))],
                    ),
                })
            }
            CapacityStatus::High | CapacityStatus::Adequate => None,
        }
    }

    /// 超载严重程度
    pub fn overload_severity(&self, utilization: f64) -> Severity {
        if utilization > self.config.severe_overload_above_pct {
            Severity::High
        } else {
            Severity::Medium
        }
    }
}
