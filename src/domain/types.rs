// ==========================================
// 牧场载畜平衡系统 - 领域类型定义
// ==========================================
// 职责: 牧草等级、牧场生产模式、载畜状态、畜群类别标签等枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与存储/报表一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 牧草等级 (Pasture Quality)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PastureQuality {
    Low,    // 低
    Medium, // 中
    High,   // 高
}

impl fmt::Display for PastureQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PastureQuality::Low => write!(f, "LOW"),
            PastureQuality::Medium => write!(f, "MEDIUM"),
            PastureQuality::High => write!(f, "HIGH"),
        }
    }
}

impl PastureQuality {
    /// 从字符串解析牧草等级
    ///
    /// 同时接受英文代码与葡语代码 (ALTA/MEDIA/BAIXA)，无法识别时返回 None
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "LOW" | "BAIXA" => Some(PastureQuality::Low),
            "MEDIUM" | "MEDIA" | "MÉDIA" => Some(PastureQuality::Medium),
            "HIGH" | "ALTA" => Some(PastureQuality::High),
            _ => None,
        }
    }
}

impl Default for PastureQuality {
    fn default() -> Self {
        PastureQuality::Medium
    }
}

// ==========================================
// 牧场生产模式 (Herd Profile)
// ==========================================
// 决定目标牧场可接收的畜群类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HerdProfile {
    BreedingOnly,  // 只做繁育 (cria)
    RearingOnly,   // 只做育成 (recria)
    FatteningOnly, // 只做育肥 (engorda)
    Feedlot,       // 舍饲育肥
    FullCycle,     // 全周期
}

impl fmt::Display for HerdProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HerdProfile::BreedingOnly => write!(f, "BREEDING_ONLY"),
            HerdProfile::RearingOnly => write!(f, "REARING_ONLY"),
            HerdProfile::FatteningOnly => write!(f, "FATTENING_ONLY"),
            HerdProfile::Feedlot => write!(f, "FEEDLOT"),
            HerdProfile::FullCycle => write!(f, "FULL_CYCLE"),
        }
    }
}

impl HerdProfile {
    /// 从字符串解析生产模式
    ///
    /// 同时接受英文代码与葡语代码 (SO_CRIA/SO_RECRIA/SO_ENGORDA/CONFINAMENTO/CICLO_COMPLETO)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "BREEDING_ONLY" | "SO_CRIA" => Some(HerdProfile::BreedingOnly),
            "REARING_ONLY" | "SO_RECRIA" => Some(HerdProfile::RearingOnly),
            "FATTENING_ONLY" | "SO_ENGORDA" => Some(HerdProfile::FatteningOnly),
            "FEEDLOT" | "CONFINAMENTO" => Some(HerdProfile::Feedlot),
            "FULL_CYCLE" | "CICLO_COMPLETO" => Some(HerdProfile::FullCycle),
            _ => None,
        }
    }
}

impl Default for HerdProfile {
    fn default() -> Self {
        HerdProfile::FullCycle
    }
}

// ==========================================
// 载畜状态 (Capacity Status)
// ==========================================
// 阈值: >100% 超载, >85% 偏高, <50% 闲置, 其余适中
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapacityStatus {
    Overloaded, // 超载
    High,       // 偏高
    Underused,  // 闲置
    Adequate,   // 适中
}

impl fmt::Display for CapacityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityStatus::Overloaded => write!(f, "OVERLOADED"),
            CapacityStatus::High => write!(f, "HIGH"),
            CapacityStatus::Underused => write!(f, "UNDERUSED"),
            CapacityStatus::Adequate => write!(f, "ADEQUATE"),
        }
    }
}

// ==========================================
// 畜群类别标签 (Category Tag)
// ==========================================
// 类别名称 -> 标签 的映射在 EngineConfig 中配置
// 兼容性判断只看标签，不做字符串匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryTag {
    Calf,         // 犊牛 0-12 月
    Yearling,     // 育成公牛 12-24 月
    Heifer,       // 育成母牛 12-24 月
    Steer,        // 架子牛 24-36 月
    Primiparous,  // 初产母牛
    Multiparous,  // 经产母牛
    Bull,         // 种公牛
    CullCow,      // 淘汰母牛
    Unclassified, // 未登记类别
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryTag::Calf => write!(f, "CALF"),
            CategoryTag::Yearling => write!(f, "YEARLING"),
            CategoryTag::Heifer => write!(f, "HEIFER"),
            CategoryTag::Steer => write!(f, "STEER"),
            CategoryTag::Primiparous => write!(f, "PRIMIPAROUS"),
            CategoryTag::Multiparous => write!(f, "MULTIPAROUS"),
            CategoryTag::Bull => write!(f, "BULL"),
            CategoryTag::CullCow => write!(f, "CULL_COW"),
            CategoryTag::Unclassified => write!(f, "UNCLASSIFIED"),
        }
    }
}

// ==========================================
// 失衡类型与严重度
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImbalanceType {
    Overload, // 超载
    Underuse, // 闲置
}

impl fmt::Display for ImbalanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImbalanceType::Overload => write!(f, "OVERLOAD"),
            ImbalanceType::Underuse => write!(f, "UNDERUSE"),
        }
    }
}

// 顺序: Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
        }
    }
}

// ==========================================
// ROI 等级 (ROI Tier)
// ==========================================
// 顺序: Low < Fair < Good < Excellent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoiTier {
    Low,       // <20%
    Fair,      // 20-49%
    Good,      // 50-99%
    Excellent, // >=100%
}

impl fmt::Display for RoiTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoiTier::Low => write!(f, "LOW"),
            RoiTier::Fair => write!(f, "FAIR"),
            RoiTier::Good => write!(f, "GOOD"),
            RoiTier::Excellent => write!(f, "EXCELLENT"),
        }
    }
}

// ==========================================
// 系统整体状态 (按平均利用率)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemStatus {
    Critical,  // >90%
    Attention, // >80%
    Adequate,  // >=60%
    Fair,      // >=40%
    Underused, // <40%
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemStatus::Critical => write!(f, "CRITICAL"),
            SystemStatus::Attention => write!(f, "ATTENTION"),
            SystemStatus::Adequate => write!(f, "ADEQUATE"),
            SystemStatus::Fair => write!(f, "FAIR"),
            SystemStatus::Underused => write!(f, "UNDERUSED"),
        }
    }
}

impl SystemStatus {
    /// 本地化显示文本的 i18n 键
    pub fn label_key(&self) -> &'static str {
        match self {
            SystemStatus::Critical => "system_status.critical",
            SystemStatus::Attention => "system_status.attention",
            SystemStatus::Adequate => "system_status.adequate",
            SystemStatus::Fair => "system_status.fair",
            SystemStatus::Underused => "system_status.underused",
        }
    }
}
