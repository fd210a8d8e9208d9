// ==========================================
// 牧场载畜平衡系统 - 调拨优化编排器
// ==========================================
// 用途: 协调各引擎的执行顺序
// 流程: 载畜评估 -> 失衡识别 -> 调拨匹配 -> 可行性 -> 成本/收益 -> ROI -> 排序
// 红线: 所有输出均为建议，不修改存栏，不缓存
// ==========================================

use crate::config::EngineConfig;
use crate::domain::assessment::CapacityAssessment;
use crate::domain::transfer::{
    BalanceReport, BenefitBreakdown, CostBreakdown, PropertyShift, RoiResult, SkippedProperty,
    TransferCandidate, TransferEvaluation, TransferRecommendation, ViabilityCheck,
};
use crate::domain::types::{CapacityStatus, SystemStatus};
use crate::domain::utilization_pct;
use crate::engine::benefit::BenefitModel;
use crate::engine::capacity::CapacityAnalyzer;
use crate::engine::cost::CostModel;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::imbalance::ImbalanceDetector;
use crate::engine::matcher::TransferMatcher;
use crate::engine::ranker::RecommendationRanker;
use crate::engine::roi::RoiEvaluator;
use crate::engine::viability::ViabilityChecker;
use crate::i18n::{t, t_with_args};
use crate::repository::RanchRepository;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// 系统状态阈值 (平均利用率 %)
const SYSTEM_CRITICAL_ABOVE: f64 = 90.0;
const SYSTEM_ATTENTION_ABOVE: f64 = 80.0;
const SYSTEM_ADEQUATE_FROM: f64 = 60.0;
const SYSTEM_FAIR_FROM: f64 = 40.0;

// 告警阈值
const ALERT_MIN_UNDERUSED: usize = 2;
const ALERT_NEAR_CAPACITY_ABOVE: f64 = 85.0;
const ALERT_IDLE_BELOW: f64 = 45.0;

/// 单个调拨方案的评估结果 (内部复用)
struct Scored {
    viability: ViabilityCheck,
    cost: CostBreakdown,
    benefit: BenefitBreakdown,
    roi: RoiResult,
    verdict: String,
}

// ==========================================
// TransferOptimizer - 调拨优化编排器
// ==========================================
pub struct TransferOptimizer {
    repo: Arc<dyn RanchRepository>,
    config: Arc<EngineConfig>,
    analyzer: CapacityAnalyzer,
    detector: ImbalanceDetector,
    matcher: TransferMatcher,
    checker: ViabilityChecker,
    cost_model: CostModel,
    benefit_model: BenefitModel,
    roi_evaluator: RoiEvaluator,
    ranker: RecommendationRanker,
}

impl TransferOptimizer {
    /// 创建编排器
    ///
    /// # 参数
    /// - repo: 牧场只读仓储
    /// - config: 引擎配置（各引擎共享）
    pub fn new(repo: Arc<dyn RanchRepository>, config: Arc<EngineConfig>) -> Self {
        Self {
            analyzer: CapacityAnalyzer::new(config.clone()),
            detector: ImbalanceDetector::new(config.clone()),
            matcher: TransferMatcher::new(config.clone()),
            checker: ViabilityChecker::new(config.clone()),
            cost_model: CostModel::new(config.clone()),
            benefit_model: BenefitModel::new(config.clone()),
            roi_evaluator: RoiEvaluator::new(config.clone()),
            ranker: RecommendationRanker::new(),
            repo,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ==========================================
    // 载畜评估
    // ==========================================

    /// 评估单个牧场
    pub fn assess_property(&self, property_id: &str) -> EngineResult<CapacityAssessment> {
        require_id("property_id", property_id)?;
        self.analyzer
            .assess_from_repository(self.repo.as_ref(), property_id)
    }

    /// 评估牧场主名下全部牧场
    ///
    /// 单个牧场数据不可用时跳过并记录，不中止整体评估
    #[instrument(skip(self))]
    pub fn assess_owner(
        &self,
        owner_id: &str,
    ) -> EngineResult<(Vec<CapacityAssessment>, Vec<SkippedProperty>)> {
        require_id("owner_id", owner_id)?;
        let property_ids = self.repo.list_owner_properties(owner_id)?;

        let mut assessments = Vec::with_capacity(property_ids.len());
        let mut skipped = Vec::new();

        for property_id in property_ids {
            match self
                .analyzer
                .assess_from_repository(self.repo.as_ref(), &property_id)
            {
                Ok(assessment) => assessments.push(assessment),
                Err(e) => {
                    warn!(property_id = %property_id, error = %e, "牧场评估失败，已跳过");
                    skipped.push(SkippedProperty {
                        property_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            assessed = assessments.len(),
            skipped = skipped.len(),
            "牧场主评估完成"
        );
        Ok((assessments, skipped))
    }

    // ==========================================
    // 指定调拨方案评估
    // ==========================================

    /// 评估调用方给定的调拨方案
    ///
    /// 成本/收益/ROI 总是计算；不可行时结论为 NOT RECOMMENDED
    ///
    /// # 错误
    /// - InvalidInput: ID 为空、起终点相同、头数为 0、距离非法
    /// - DataUnavailable: 牧场不存在
    #[instrument(skip(self))]
    pub fn evaluate_transfer(
        &self,
        origin_id: &str,
        destination_id: &str,
        category: &str,
        head_count: u32,
        distance_km: f64,
    ) -> EngineResult<TransferEvaluation> {
        require_route(origin_id, destination_id)?;
        if category.trim().is_empty() {
            return Err(EngineError::InvalidInput("category 不能为空".to_string()));
        }
        if head_count == 0 {
            return Err(EngineError::InvalidInput("head_count 必须大于 0".to_string()));
        }
        require_distance(distance_km)?;

        let origin = self.assess_property(origin_id)?;
        let destination = self.assess_property(destination_id)?;

        let au_factor = self.config.au_factor(category);
        let candidate = TransferCandidate {
            origin_id: origin_id.to_string(),
            destination_id: destination_id.to_string(),
            category: category.to_string(),
            head_count,
            au_factor,
            au_moved: head_count as f64 * au_factor,
            distance_km,
        };

        let scored = self.score(&origin, &destination, &candidate);

        info!(
            origin_id,
            destination_id,
            au_moved = candidate.au_moved,
            viable = scored.viability.viable,
            roi_pct = scored.roi.roi_pct,
            "调拨方案评估完成"
        );

        Ok(TransferEvaluation {
            origin: shift(&origin, origin.au_load - candidate.au_moved),
            destination: shift(&destination, destination.au_load + candidate.au_moved),
            candidate,
            viability: scored.viability,
            cost: scored.cost,
            benefit: scored.benefit,
            roi: scored.roi,
            verdict: scored.verdict,
        })
    }

    // ==========================================
    // 调拨建议
    // ==========================================

    /// 指定起终点的调拨建议
    ///
    /// 距离优先取参数，其次取仓储，最后取默认距离；
    /// 无法匹配（超载量/剩余容量不足、无兼容类别）时返回 None
    #[instrument(skip(self))]
    pub fn recommend_pair(
        &self,
        origin_id: &str,
        destination_id: &str,
        distance_km: Option<f64>,
    ) -> EngineResult<Option<TransferRecommendation>> {
        require_route(origin_id, destination_id)?;
        if let Some(d) = distance_km {
            require_distance(d)?;
        }

        let origin = self.assess_property(origin_id)?;
        let destination = self.assess_property(destination_id)?;
        let distance = match distance_km {
            Some(d) => d,
            None => self.distance_between(origin_id, destination_id)?,
        };

        let recommendation = self
            .matcher
            .match_explicit_pair(&origin, &destination, distance)
            .map(|candidate| self.build_recommendation(&origin, &destination, candidate));

        if recommendation.is_none() {
            debug!(origin_id, destination_id, "指定起终点无可行匹配");
        }
        Ok(recommendation)
    }

    /// 牧场主全局调拨扫描
    ///
    /// 超载起点 × 闲置终点逐对匹配，仅保留可行且 ROI 达标的建议，ROI 降序
    #[instrument(skip(self))]
    pub fn sweep_owner(&self, owner_id: &str) -> EngineResult<Vec<TransferRecommendation>> {
        let (assessments, _) = self.assess_owner(owner_id)?;
        let candidates = self.sweep_candidates(&assessments);
        let total = candidates.len();
        let ranked = self.ranker.rank_by_roi(candidates);

        info!(
            owner_id,
            candidates = total,
            accepted = ranked.len(),
            "全局调拨扫描完成"
        );
        Ok(ranked)
    }

    // ==========================================
    // 平衡分析报告
    // ==========================================

    /// 牧场主全局平衡分析
    ///
    /// include_recommendations 为 true 时附带按优先级排序的调拨建议
    #[instrument(skip(self))]
    pub fn analyze_balance(
        &self,
        owner_id: &str,
        include_recommendations: bool,
    ) -> EngineResult<BalanceReport> {
        let (assessments, skipped) = self.assess_owner(owner_id)?;

        let total_au_load: f64 = assessments.iter().map(|a| a.au_load).sum();
        let total_au_capacity: f64 = assessments.iter().map(|a| a.au_capacity).sum();
        let mean_utilization_pct = utilization_pct(total_au_load, total_au_capacity);
        let system_status = system_status(mean_utilization_pct);

        let imbalances = self.detector.detect(&assessments);
        let alerts = system_alerts(&assessments, mean_utilization_pct);

        let recommendations = if include_recommendations {
            self.ranker
                .rank_by_priority(self.sweep_candidates(&assessments))
        } else {
            Vec::new()
        };

        info!(
            owner_id,
            properties = assessments.len(),
            skipped = skipped.len(),
            mean_utilization_pct,
            system_status = %system_status,
            imbalances = imbalances.len(),
            recommendations = recommendations.len(),
            "平衡分析完成"
        );

        Ok(BalanceReport {
            owner_id: owner_id.to_string(),
            generated_at: Utc::now().naive_utc(),
            total_properties: assessments.len(),
            total_au_load,
            total_au_capacity,
            mean_utilization_pct,
            system_status,
            system_status_label: t(system_status.label_key()),
            assessments,
            imbalances,
            alerts,
            recommendations,
            skipped,
        })
    }

    // ==========================================
    // 内部流程
    // ==========================================

    /// 超载 × 闲置逐对匹配 (受 max_pairs 约束)
    ///
    /// 单对失败只记录，不影响其余组合
    fn sweep_candidates(&self, assessments: &[CapacityAssessment]) -> Vec<TransferRecommendation> {
        let origins: Vec<&CapacityAssessment> = assessments
            .iter()
            .filter(|a| a.status == CapacityStatus::Overloaded)
            .collect();
        let destinations: Vec<&CapacityAssessment> = assessments
            .iter()
            .filter(|a| a.status == CapacityStatus::Underused)
            .collect();

        let mut recommendations = Vec::new();
        let mut examined = 0usize;

        'outer: for origin in &origins {
            for destination in &destinations {
                if examined >= self.config.max_pairs {
                    warn!(
                        max_pairs = self.config.max_pairs,
                        origins = origins.len(),
                        destinations = destinations.len(),
                        "调拨组合数达到上限，停止扫描"
                    );
                    break 'outer;
                }
                examined += 1;

                let distance =
                    match self.distance_between(&origin.property_id, &destination.property_id) {
                        Ok(d) => d,
                        Err(e) => {
                            warn!(
                                origin_id = %origin.property_id,
                                destination_id = %destination.property_id,
                                error = %e,
                                "距离查询失败，跳过该组合"
                            );
                            continue;
                        }
                    };

                if let Some(candidate) = self.matcher.match_for_sweep(origin, destination, distance) {
                    recommendations.push(self.build_recommendation(origin, destination, candidate));
                }
            }
        }

        debug!(
            examined,
            matched = recommendations.len(),
            "调拨组合匹配完成"
        );
        recommendations
    }

    fn build_recommendation(
        &self,
        origin: &CapacityAssessment,
        destination: &CapacityAssessment,
        candidate: TransferCandidate,
    ) -> TransferRecommendation {
        let scored = self.score(origin, destination, &candidate);
        let priority = self
            .ranker
            .priority(origin.utilization_pct, candidate.au_moved);
        let estimated_benefit = self.benefit_model.quick_estimate(
            origin.utilization_pct,
            destination.utilization_pct,
            candidate.au_moved,
        );
        let reason = t_with_args(
            "recommendation.reason",
            &[
                ("origin", &format!("{:.0}", origin.utilization_pct)),
                ("destination", &format!("{:.0}", destination.utilization_pct)),
            ],
        );

        TransferRecommendation {
            recommendation_id: Uuid::new_v4().to_string(),
            origin_id: origin.property_id.clone(),
            origin_name: origin.property_name.clone(),
            destination_id: destination.property_id.clone(),
            destination_name: destination.property_name.clone(),
            category: candidate.category,
            quantity: candidate.head_count,
            au_moved: candidate.au_moved,
            distance_km: candidate.distance_km,
            cost: scored.cost,
            benefit: scored.benefit,
            roi: scored.roi,
            viability: scored.viability,
            priority,
            estimated_benefit,
            reason,
            verdict: scored.verdict,
        }
    }

    fn score(
        &self,
        origin: &CapacityAssessment,
        destination: &CapacityAssessment,
        candidate: &TransferCandidate,
    ) -> Scored {
        let viability = self.checker.check(origin, destination, candidate);
        let cost = self
            .cost_model
            .price(candidate.head_count, candidate.au_moved, candidate.distance_km);
        let benefit = self
            .benefit_model
            .estimate(origin, destination, candidate.au_moved);
        let roi = self.roi_evaluator.evaluate(&cost, &benefit);
        let verdict = self.roi_evaluator.verdict(&viability, &roi);

        Scored {
            viability,
            cost,
            benefit,
            roi,
            verdict,
        }
    }

    /// 起终点距离: 仓储提供则取仓储，否则取默认距离
    ///
    /// 仓储中的距离与参数同样校验，负数/非有限值返回 InvalidInput
    pub fn distance_between(&self, origin_id: &str, destination_id: &str) -> EngineResult<f64> {
        let distance_km = self
            .repo
            .distance_km(origin_id, destination_id)?
            .unwrap_or(self.config.default_distance_km);
        require_distance(distance_km)?;
        Ok(distance_km)
    }
}

// ==========================================
// 系统级指标
// ==========================================

/// 系统状态 (按平均利用率)
pub fn system_status(mean_utilization_pct: f64) -> SystemStatus {
    if mean_utilization_pct > SYSTEM_CRITICAL_ABOVE {
        SystemStatus::Critical
    } else if mean_utilization_pct > SYSTEM_ATTENTION_ABOVE {
        SystemStatus::Attention
    } else if mean_utilization_pct >= SYSTEM_ADEQUATE_FROM {
        SystemStatus::Adequate
    } else if mean_utilization_pct >= SYSTEM_FAIR_FROM {
        SystemStatus::Fair
    } else {
        SystemStatus::Underused
    }
}

/// 系统告警 (本地化文本)
pub fn system_alerts(assessments: &[CapacityAssessment], mean_utilization_pct: f64) -> Vec<String> {
    let mut alerts = Vec::new();

    let overloaded = assessments
        .iter()
        .filter(|a| a.status == CapacityStatus::Overloaded)
        .count();
    if overloaded > 0 {
        alerts.push(t_with_args(
            "alert.overloaded_properties",
            &[("count", &overloaded.to_string())],
        ));
    }

    let underused = assessments
        .iter()
        .filter(|a| a.status == CapacityStatus::Underused)
        .count();
    if underused >= ALERT_MIN_UNDERUSED {
        alerts.push(t_with_args(
            "alert.underused_properties",
            &[("count", &underused.to_string())],
        ));
    }

    if mean_utilization_pct > ALERT_NEAR_CAPACITY_ABOVE {
        alerts.push(t("alert.near_capacity"));
    } else if mean_utilization_pct < ALERT_IDLE_BELOW {
        alerts.push(t("alert.idle_capacity"));
    }

    alerts
}

fn shift(assessment: &CapacityAssessment, au_after: f64) -> PropertyShift {
    PropertyShift {
        property_id: assessment.property_id.clone(),
        property_name: assessment.property_name.clone(),
        au_before: assessment.au_load,
        au_after,
        utilization_before: assessment.utilization_pct,
        utilization_after: utilization_pct(au_after, assessment.au_capacity),
    }
}

fn require_id(field: &str, value: &str) -> EngineResult<()> {
    if value.trim().is_empty() {
        return Err(EngineError::InvalidInput(format!("{} 不能为空", field)));
    }
    Ok(())
}

fn require_route(origin_id: &str, destination_id: &str) -> EngineResult<()> {
    require_id("origin_id", origin_id)?;
    require_id("destination_id", destination_id)?;
    if origin_id == destination_id {
        return Err(EngineError::InvalidInput(format!(
            "起点与终点相同: {}",
            origin_id
        )));
    }
    Ok(())
}

fn require_distance(distance_km: f64) -> EngineResult<()> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "distance_km 非法: {}",
            distance_km
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::property::{InventoryItem, PropertyAttributes};
    use crate::domain::types::{HerdProfile, PastureQuality};
    use crate::repository::InMemoryRanchRepository;

    fn property(id: &str, area: f64, profile: HerdProfile) -> PropertyAttributes {
        PropertyAttributes::new(id, "O1", id, area, PastureQuality::Medium, profile)
    }

    fn optimizer(repo: InMemoryRanchRepository) -> TransferOptimizer {
        TransferOptimizer::new(Arc::new(repo), Arc::new(EngineConfig::default()))
    }

    #[test]
    fn test_system_status_bands() {
        assert_eq!(system_status(95.0), SystemStatus::Critical);
        assert_eq!(system_status(90.0), SystemStatus::Attention);
        assert_eq!(system_status(80.0), SystemStatus::Adequate);
        assert_eq!(system_status(60.0), SystemStatus::Adequate);
        assert_eq!(system_status(40.0), SystemStatus::Fair);
        assert_eq!(system_status(39.9), SystemStatus::Underused);
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        let opt = optimizer(InMemoryRanchRepository::new());

        assert!(matches!(
            opt.evaluate_transfer("P1", "P1", "Touros", 5, 10.0),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            opt.evaluate_transfer("P1", "P2", "Touros", 0, 10.0),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            opt.evaluate_transfer("P1", "P2", "Touros", 5, -1.0),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            opt.recommend_pair("", "P2", None),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_property_is_data_unavailable() {
        let repo = InMemoryRanchRepository::new()
            .with_property(property("P1", 100.0, HerdProfile::FullCycle), vec![]);
        let opt = optimizer(repo);
        assert!(matches!(
            opt.evaluate_transfer("P1", "P9", "Touros", 5, 10.0),
            Err(EngineError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_recommend_pair_uses_repository_distance() {
        let mut repo = InMemoryRanchRepository::new()
            .with_property(
                property("P1", 100.0, HerdProfile::FullCycle),
                vec![InventoryItem::new("Multíparas (>36m)", 120)],
            )
            .with_property(property("P2", 100.0, HerdProfile::FullCycle), vec![]);
        repo.set_distance("P1", "P2", 30.0);

        let rec = optimizer(repo)
            .recommend_pair("P1", "P2", None)
            .unwrap()
            .unwrap();

        // 超载 20 AU，终点剩余 100 × 0.8 = 80 -> 目标 20 AU = 20 头
        assert_eq!(rec.quantity, 20);
        assert_eq!(rec.au_moved, 20.0);
        assert_eq!(rec.distance_km, 30.0);
        assert!(rec.viability.viable);
    }

    #[test]
    fn test_negative_repository_distance_is_rejected() {
        let mut repo = InMemoryRanchRepository::new()
            .with_property(
                property("P1", 100.0, HerdProfile::FullCycle),
                vec![InventoryItem::new("Multíparas (>36m)", 150)],
            )
            .with_property(property("P2", 200.0, HerdProfile::FullCycle), vec![]);
        repo.set_distance("P1", "P2", -400.0);
        let opt = optimizer(repo);

        assert!(matches!(
            opt.distance_between("P1", "P2"),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            opt.recommend_pair("P1", "P2", None),
            Err(EngineError::InvalidInput(_))
        ));
        // 显式距离不受仓储脏数据影响
        assert!(opt.recommend_pair("P1", "P2", Some(40.0)).unwrap().is_some());
        // 扫描时该组合被跳过
        assert!(opt.sweep_owner("O1").unwrap().is_empty());
    }

    #[test]
    fn test_alerts() {
        let alerts = system_alerts(&[], 30.0);
        assert_eq!(alerts.len(), 1);
        let alerts = system_alerts(&[], 70.0);
        assert!(alerts.is_empty());
    }
}
