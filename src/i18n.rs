// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和巴西葡语 (pt-BR)
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" 或 "pt-BR"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use ranch_balance::i18n::t;
/// let msg = t("alert.near_capacity");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use ranch_balance::i18n::t_with_args;
/// let msg = t_with_args("imbalance.overload_action", &[("au", "50")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    fill_args(rust_i18n::t!(key).to_string(), args)
}

/// 按指定语言翻译（不修改全局语言）
pub fn t_in(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    fill_args(rust_i18n::t!(key, locale = locale).to_string(), args)
}

fn fill_args(mut result: String, args: &[(&str, &str)]) -> String {
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // 全局语言在并行测试间共享，这里只用 t_in 指定语言

    #[test]
    fn test_translate_in_both_locales() {
        assert_eq!(t_in("en", "system_status.critical", &[]), "CRITICAL - System overloaded");
        assert_eq!(
            t_in("pt-BR", "system_status.critical", &[]),
            "CRÍTICO - Sistema superlotado"
        );
    }

    #[test]
    fn test_translate_with_args() {
        let msg = t_in("en", "imbalance.overload_action", &[("au", "50")]);
        assert!(msg.contains("50"));
        assert!(msg.contains("Transfer"));

        let msg = t_in("pt-BR", "imbalance.overload_action", &[("au", "50")]);
        assert!(msg.contains("50"));
        assert!(msg.contains("Transferir"));
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        assert_eq!(t_in("fr", "alert.near_capacity", &[]), t_in("en", "alert.near_capacity", &[]));
    }
}
