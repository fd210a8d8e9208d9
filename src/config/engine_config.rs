// ==========================================
// 牧场载畜平衡系统 - 引擎配置
// ==========================================
// 职责: AU 折算表、承载系数、阈值、成本/收益费率
// 红线: 配置对象在构造引擎时注入，不使用全局可变状态
// ==========================================

use crate::domain::types::{CategoryTag, PastureQuality};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置值无效 (key={key}): {message}")]
    InvalidValue { key: String, message: String },

    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}

// ==========================================
// CategorySpec - 畜群类别定义
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    /// 每头折算 AU (1 AU ≈ 450kg 成年母牛)
    pub au_factor: f64,
    /// 兼容性判断用标签
    pub tag: CategoryTag,
}

impl CategorySpec {
    pub fn new(au_factor: f64, tag: CategoryTag) -> Self {
        Self { au_factor, tag }
    }
}

// ==========================================
// EngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // ===== AU 折算 =====
    pub categories: BTreeMap<String, CategorySpec>,
    pub default_au_factor: f64,

    // ===== 承载能力 =====
    pub au_per_hectare: f64,
    pub high_quality_multiplier: f64,
    pub medium_quality_multiplier: f64,
    pub low_quality_multiplier: f64,

    // ===== 状态阈值 (%) =====
    pub overloaded_above_pct: f64,
    pub high_above_pct: f64,
    pub underused_below_pct: f64,
    pub severe_overload_above_pct: f64,

    // ===== 调拨匹配 =====
    pub sweep_transfer_ratio: f64,
    pub pair_transfer_ratio: f64,
    pub sweep_min_au: f64,
    pub pair_min_au: f64,
    pub min_category_heads: u32,
    pub max_category_share: f64,
    pub destination_ceiling_pct: f64,
    pub default_distance_km: f64,
    pub max_pairs: usize,

    // ===== 成本费率 =====
    pub transport_rate_per_au_km: f64,
    pub handling_cost_per_head: f64,
    pub medical_cost_per_head: f64,
    pub administrative_rate: f64,

    // ===== 收益参数 =====
    pub relief_reference_pct: f64,
    pub au_market_value: f64,
    pub monthly_loss_rate: f64,
    pub idle_pasture_value_per_au: f64,
    pub idle_destination_below_pct: f64,
    pub optimization_value_per_au: f64,

    // ===== ROI =====
    pub min_accept_roi_pct: f64,
    pub payback_sentinel_months: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            default_au_factor: 0.75,

            au_per_hectare: 1.0,
            high_quality_multiplier: 1.2,
            medium_quality_multiplier: 1.0,
            low_quality_multiplier: 0.8,

            overloaded_above_pct: 100.0,
            high_above_pct: 85.0,
            underused_below_pct: 50.0,
            severe_overload_above_pct: 110.0,

            sweep_transfer_ratio: 0.70,
            pair_transfer_ratio: 0.80,
            sweep_min_au: 5.0,
            pair_min_au: 3.0,
            min_category_heads: 5,
            max_category_share: 0.80,
            destination_ceiling_pct: 95.0,
            default_distance_km: 50.0,
            max_pairs: 10_000,

            transport_rate_per_au_km: 2.50,
            handling_cost_per_head: 50.00,
            medical_cost_per_head: 30.00,
            administrative_rate: 0.10,

            relief_reference_pct: 85.0,
            au_market_value: 2000.0,
            monthly_loss_rate: 0.02,
            idle_pasture_value_per_au: 500.0,
            idle_destination_below_pct: 60.0,
            optimization_value_per_au: 300.0,

            min_accept_roi_pct: 50.0,
            payback_sentinel_months: 999.0,
        }
    }
}

/// 默认类别表 (巴西牧场常用类别名)
fn default_categories() -> BTreeMap<String, CategorySpec> {
    let entries = [
        ("Bezerros (0-12m)", 0.25, CategoryTag::Calf),
        ("Bezerras (0-12m)", 0.25, CategoryTag::Calf),
        ("Garrotes (12-24m)", 0.50, CategoryTag::Yearling),
        ("Novilhas (12-24m)", 0.50, CategoryTag::Heifer),
        ("Bois Magros (24-36m)", 0.75, CategoryTag::Steer),
        ("Primíparas (24-36m)", 0.85, CategoryTag::Primiparous),
        ("Multíparas (>36m)", 1.00, CategoryTag::Multiparous),
        ("Touros", 1.25, CategoryTag::Bull),
        ("Vacas de Descarte", 0.90, CategoryTag::CullCow),
    ];

    entries
        .iter()
        .map(|(name, factor, tag)| (name.to_string(), CategorySpec::new(*factor, *tag)))
        .collect()
}

impl EngineConfig {
    /// 从 JSON 加载配置（缺失字段使用默认值）
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 查找类别定义
    ///
    /// 先精确匹配，再忽略大小写与首尾空白匹配
    pub fn category_spec(&self, category: &str) -> Option<&CategorySpec> {
        if let Some(spec) = self.categories.get(category) {
            return Some(spec);
        }
        let wanted = category.trim().to_lowercase();
        self.categories
            .iter()
            .find(|(name, _)| name.trim().to_lowercase() == wanted)
            .map(|(_, spec)| spec)
    }

    /// 类别 AU 折算系数，未登记类别使用 default_au_factor
    pub fn au_factor(&self, category: &str) -> f64 {
        self.category_spec(category)
            .map(|spec| spec.au_factor)
            .unwrap_or(self.default_au_factor)
    }

    /// 类别标签，未登记类别为 Unclassified
    pub fn category_tag(&self, category: &str) -> CategoryTag {
        self.category_spec(category)
            .map(|spec| spec.tag)
            .unwrap_or(CategoryTag::Unclassified)
    }

    /// 牧草等级系数
    pub fn quality_multiplier(&self, quality: PastureQuality) -> f64 {
        match quality {
            PastureQuality::High => self.high_quality_multiplier,
            PastureQuality::Medium => self.medium_quality_multiplier,
            PastureQuality::Low => self.low_quality_multiplier,
        }
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("default_au_factor", self.default_au_factor),
            ("au_per_hectare", self.au_per_hectare),
            ("high_quality_multiplier", self.high_quality_multiplier),
            ("medium_quality_multiplier", self.medium_quality_multiplier),
            ("low_quality_multiplier", self.low_quality_multiplier),
            ("destination_ceiling_pct", self.destination_ceiling_pct),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(key, format!("必须为正数, 实际={}", value)));
            }
        }

        let non_negative = [
            ("sweep_min_au", self.sweep_min_au),
            ("pair_min_au", self.pair_min_au),
            ("default_distance_km", self.default_distance_km),
            ("transport_rate_per_au_km", self.transport_rate_per_au_km),
            ("handling_cost_per_head", self.handling_cost_per_head),
            ("medical_cost_per_head", self.medical_cost_per_head),
            ("administrative_rate", self.administrative_rate),
            ("au_market_value", self.au_market_value),
            ("monthly_loss_rate", self.monthly_loss_rate),
            ("idle_pasture_value_per_au", self.idle_pasture_value_per_au),
            ("optimization_value_per_au", self.optimization_value_per_au),
            ("min_accept_roi_pct", self.min_accept_roi_pct),
            ("payback_sentinel_months", self.payback_sentinel_months),
        ];
        for (key, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(key, format!("不能为负数, 实际={}", value)));
            }
        }

        let ratios = [
            ("sweep_transfer_ratio", self.sweep_transfer_ratio),
            ("pair_transfer_ratio", self.pair_transfer_ratio),
            ("max_category_share", self.max_category_share),
        ];
        for (key, value) in ratios {
            if !(value > 0.0 && value <= 1.0) {
                return Err(invalid(key, format!("必须在 (0, 1] 区间, 实际={}", value)));
            }
        }

        if !(self.underused_below_pct < self.high_above_pct
            && self.high_above_pct < self.overloaded_above_pct)
        {
            return Err(invalid(
                "status_thresholds",
                format!(
                    "需满足 underused({}) < high({}) < overloaded({})",
                    self.underused_below_pct, self.high_above_pct, self.overloaded_above_pct
                ),
            ));
        }

        for (name, spec) in &self.categories {
            if !(spec.au_factor.is_finite() && spec.au_factor > 0.0) {
                return Err(invalid(
                    &format!("categories.{}", name),
                    format!("AU 系数必须为正数, 实际={}", spec.au_factor),
                ));
            }
        }

        if self.max_pairs == 0 {
            return Err(invalid("max_pairs", "必须大于 0".to_string()));
        }

        Ok(())
    }
}

fn invalid(key: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    }
}
