use std::io;

use any_to_gif::action::cli::process_args;

#[tokio::main]
async fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let output = match process_args(args).await {
        Ok(output) => output,
        Err(e) => {
            log::error!("轉換失敗：{}", e);
            return Err(e.into());
        }
    };
    log::info!("程式執行完成，輸出檔案：{}", output);
    println!("轉換完成！輸出檔案位於：{}", output);
    Ok(())
}
