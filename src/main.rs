//! # Cofoundify - 命令行入口点
//!
//! 组装应用状态，可选地先登录，然后把指定路由的页面以 JSON 形式打印到标准输出。
//! 所有逻辑位于 `app_lib`（即 `lib.rs`）中，这里只处理参数和输出。
//!
//! ```text
//! cofoundify /ideas
//! cofoundify /dashboard --email aarav@example.com --password secret
//! cofoundify /workspace/workspace1 --data-dir /tmp/cofoundify
//! cofoundify /dashboard --sort-by-latest true --email aarav@example.com --password secret
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use app_lib::AppState;
use app_lib::commands::{auth, pages};
use app_lib::services::settings;

/// 渲染 Cofoundify 的一个页面
#[derive(Debug, Parser)]
#[command(name = "cofoundify", version, about)]
struct Cli {
    /// 要渲染的路由，如 `/ideas`、`/workspace/workspace1`
    #[arg(default_value = "/")]
    route: String,

    /// 数据目录（会话与设置），默认 `~/.cofoundify/`
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// 渲染前先用该邮箱登录
    #[arg(long, requires = "password")]
    email: Option<String>,

    /// 登录密码，与 `--email` 一起使用
    #[arg(long, requires = "email")]
    password: Option<String>,

    /// 保存仪表盘会话排序设置：`true` 按最新消息排序，`false` 按首次出现顺序
    #[arg(long, value_name = "BOOL")]
    sort_by_latest: Option<bool>,
}

#[tokio::main]
async fn main() -> ExitCode {
    app_lib::init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, String> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => app_lib::utils::path::get_data_path()?,
    };

    if let Some(sort) = cli.sort_by_latest {
        settings::update_settings(&data_dir, |s| s.sort_conversations_by_latest = sort)
            .await
            .map_err(|e| e.to_string())?;
    }

    let state = AppState::bootstrap(Some(data_dir)).await?;

    if let (Some(email), Some(password)) = (cli.email, cli.password) {
        auth::login(&state, &email, &password).await?;
    }

    let screen = pages::render(&state, &cli.route)?;
    serde_json::to_string_pretty(&screen).map_err(|e| format!("序列化页面失败: {}", e))
}
