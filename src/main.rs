// ==========================================
// 牧场载畜平衡系统 - 命令行入口
// ==========================================
// 用法: ranch-balance <db_path|default> <owner_id> [sweep|report]
// 输出: stdout 为 JSON 结果，日志写 stderr
// 语言: RANCH_BALANCE_LOCALE (en / pt-BR)，默认 en
// ==========================================

use ranch_balance::db::get_default_db_path;
use ranch_balance::{i18n, logging, ApiError, BalanceApi, ConfigScope};
use tracing::{error, info};

const LOCALE_ENV: &str = "RANCH_BALANCE_LOCALE";

const USAGE: &str = "用法: ranch-balance <db_path|default> <owner_id> [sweep|report]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Sweep,
    Report,
}

fn main() {
    logging::init();

    if let Ok(locale) = std::env::var(LOCALE_ENV) {
        if !locale.trim().is_empty() {
            i18n::set_locale(locale.trim());
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (db_arg, owner_id, command) = match parse_args(&args) {
        Some(parsed) => parsed,
        None => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    let db_path = if db_arg == "default" {
        get_default_db_path()
    } else {
        db_arg.to_string()
    };

    info!("{} v{}", ranch_balance::APP_NAME, ranch_balance::VERSION);
    info!(
        db_path = %db_path,
        owner_id,
        command = ?command,
        locale = %i18n::current_locale(),
        "开始执行"
    );

    match run(&db_path, owner_id, command) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!(error = %e, "执行失败");
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn parse_args(args: &[String]) -> Option<(&str, &str, Command)> {
    let db_arg = args.first()?.trim();
    let owner_id = args.get(1)?.trim();
    if db_arg.is_empty() || owner_id.is_empty() || args.len() > 3 {
        return None;
    }

    let command = match args.get(2).map(|s| s.trim()) {
        None | Some("sweep") => Command::Sweep,
        Some("report") => Command::Report,
        Some(_) => return None,
    };
    Some((db_arg, owner_id, command))
}

fn run(db_path: &str, owner_id: &str, command: Command) -> Result<String, ApiError> {
    let scope = ConfigScope::Owner {
        owner_id: owner_id.to_string(),
    };
    let api = BalanceApi::from_sqlite(db_path, &scope)?;

    let json = match command {
        Command::Sweep => serde_json::to_string_pretty(&api.sweep_owner(owner_id)?),
        Command::Report => serde_json::to_string_pretty(&api.analyze_balance(owner_id, true)?),
    };
    json.map_err(|e| ApiError::InternalError(format!("JSON 序列化失败: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let a = args(&["default", "O1"]);
        assert_eq!(parse_args(&a), Some(("default", "O1", Command::Sweep)));

        let a = args(&["/tmp/r.db", "O1", "report"]);
        assert_eq!(parse_args(&a), Some(("/tmp/r.db", "O1", Command::Report)));

        assert_eq!(parse_args(&args(&["default"])), None);
        assert_eq!(parse_args(&args(&["default", "O1", "plan"])), None);
        assert_eq!(parse_args(&args(&["default", " ", "sweep"])), None);
    }
}
