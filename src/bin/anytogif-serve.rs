use std::io;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use any_to_gif::server::static_server::serve;
use any_to_gif::utils::utils::setup_logging;

#[derive(Parser)]
#[command(name = "anytogif-serve", about = "本機開發用的靜態檔案伺服器")]
struct ServeCli {
    /// 提供檔案的根目錄
    #[arg(long, default_value = ".")]
    root: PathBuf,
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    log_level: String,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = ServeCli::parse();
    setup_logging(&cli.log_level)?;

    let listener = TcpListener::bind(("127.0.0.1", cli.port)).await?;
    log::info!("AnytoGif 開發伺服器：http://localhost:{}，根目錄：{}", cli.port, cli.root.display());
    serve(listener, cli.root).await
}
