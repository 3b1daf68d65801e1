//! 需要系統上的 ffmpeg；找不到時各測試直接略過

mod common;

use std::process::Command;

use any_to_gif::error::{ConvertError, EngineIoKind};
use any_to_gif::facade::conversion_facade::ConversionFacade;
use any_to_gif::models::engine::{EngineEvent, EngineResources};
use any_to_gif::models::file::{FileSelection, SourceFile};
use any_to_gif::service::ffmpeg_engine::FfmpegEngine;
use any_to_gif::service::traits::i_engine::Engine;
use any_to_gif::utils::options::ConversionOptions;

use common::{recorder, strings};

fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

async fn loaded_engine() -> Option<FfmpegEngine> {
    if !ffmpeg_available() {
        eprintln!("略過：找不到 ffmpeg");
        return None;
    }
    let mut engine = FfmpegEngine::new();
    engine.load(&EngineResources::native("ffmpeg")).await.unwrap();
    Some(engine)
}

/// 以 lavfi 產生一張純色 PNG
async fn solid_png(engine: &FfmpegEngine, color: &str) -> Vec<u8> {
    let name = format!("seed_{}.png", color);
    engine
        .exec(&strings(&[
            "-f", "lavfi", "-i", &format!("color=c={}:s=32x32:d=1", color), "-frames:v", "1", "-update", "1", "-y", &name,
        ]))
        .await
        .unwrap();
    let data = engine.read_file(&name).await.unwrap();
    engine.delete_file(&name).await.unwrap();
    data
}

#[tokio::test]
async fn workspace_entries_behave_like_files() {
    let Some(engine) = loaded_engine().await else {
        return;
    };
    engine.write_file("a.bin", vec![1, 2, 3]).await.unwrap();
    assert_eq!(engine.read_file("a.bin").await.unwrap(), vec![1, 2, 3]);
    engine.write_file("a.bin", vec![4]).await.unwrap();
    assert_eq!(engine.read_file("a.bin").await.unwrap(), vec![4]);

    engine.delete_file("a.bin").await.unwrap();
    let err = engine.delete_file("a.bin").await.unwrap_err();
    assert!(err.is_not_found());
    let err = engine.read_file("a.bin").await.unwrap_err();
    assert!(matches!(err, ConvertError::EngineIo { kind: EngineIoKind::NotFound, .. }));

    let err = engine.write_file("../escape.bin", vec![0]).await.unwrap_err();
    assert!(matches!(err, ConvertError::EngineIo { kind: EngineIoKind::InvalidName, .. }));
}

#[tokio::test]
async fn single_png_converts_to_gif() {
    let Some(mut engine) = loaded_engine().await else {
        return;
    };
    let (listener, events) = recorder();
    engine.on_event(listener);

    let png = solid_png(&engine, "red").await;
    let selection = FileSelection::new(vec![SourceFile::from_bytes("still image.png", "image/png", png)]);
    let result = ConversionFacade::new(&engine)
        .convert(&selection, &ConversionOptions::default())
        .await
        .unwrap();

    assert!(result.data.starts_with(b"GIF8"));
    assert!(events.lock().unwrap().contains(&EngineEvent::Progress(1.0)));

    let dir = engine.workspace_dir().unwrap();
    assert_eq!(std::fs::read_dir(dir).unwrap().count(), 0);
}

#[tokio::test]
async fn png_sequence_converts_to_gif() {
    let Some(engine) = loaded_engine().await else {
        return;
    };
    let mut frames = Vec::new();
    for (i, color) in ["red", "green", "blue"].iter().enumerate() {
        let data = solid_png(&engine, color).await;
        frames.push(SourceFile::from_bytes(format!("f{}.png", i + 1), "image/png", data));
    }

    let options = ConversionOptions {
        width: Some(16),
        frame_rate: Some(5),
        ..Default::default()
    };
    let result = ConversionFacade::new(&engine)
        .convert(&FileSelection::new(frames), &options)
        .await
        .unwrap();
    assert!(result.data.starts_with(b"GIF8"));
    assert_eq!(result.mime, "image/gif");
}

#[tokio::test]
async fn failed_exec_reports_last_stderr_line() {
    let Some(engine) = loaded_engine().await else {
        return;
    };
    let err = engine
        .exec(&strings(&["-i", "missing.mp4", "-y", "out.gif"]))
        .await
        .unwrap_err();
    assert!(matches!(err, ConvertError::EngineExec(_)));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn missing_program_fails_to_load() {
    let mut engine = FfmpegEngine::new();
    let err = engine
        .load(&EngineResources::native("definitely-not-ffmpeg-anytogif"))
        .await
        .unwrap_err();
    assert!(matches!(err, ConvertError::EngineLoad(_)));
    assert!(!engine.is_loaded());
}
