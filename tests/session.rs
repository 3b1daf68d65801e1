mod common;

use any_to_gif::action::session::{ConversionSession, Status};
use any_to_gif::error::ConvertError;
use any_to_gif::models::engine::{EngineEvent, EngineResources};
use any_to_gif::utils::classify::ConversionStrategy;
use any_to_gif::utils::options::RawOptions;

use common::{png, recorder, video, MockEngine, FAKE_GIF};

fn session(engine: MockEngine) -> ConversionSession<MockEngine> {
    ConversionSession::new(engine, EngineResources::native("ffmpeg"))
}

#[tokio::test]
async fn empty_selection_keeps_waiting_and_skips_load() {
    let mut session = session(MockEngine::new());

    let err = session.convert(&RawOptions::default()).await.unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedSelection(ConversionStrategy::None)));
    assert_eq!(session.status(), &Status::Waiting);
    assert!(!session.engine_ready());
    assert_eq!(session.engine().snapshot(|s| s.loads), 0);
}

#[tokio::test]
async fn unsupported_selection_sets_status_without_loading() {
    let mut session = session(MockEngine::new());
    session.select(vec![video("a.mp4"), video("b.mp4")]);
    assert_eq!(session.strategy(), ConversionStrategy::Unsupported);

    let err = session.convert(&RawOptions::default()).await.unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedSelection(ConversionStrategy::Unsupported)));
    assert_eq!(session.status(), &Status::Unsupported);
    assert!(session.status().text().contains("MP4/MOV/AVI"));
    assert_eq!(session.engine().snapshot(|s| s.loads), 0);
}

#[tokio::test]
async fn successful_runs_load_engine_once() {
    let (listener, events) = recorder();
    let mut session = session(MockEngine::new()).with_listener(listener);

    session.select(vec![png("2.png", 2), png("1.png", 1)]);
    assert_eq!(session.describe_selection(), "2 張 PNG 幀 - 0.00 MB");
    let result = session.convert(&RawOptions::default()).await.unwrap();
    assert_eq!(result.data, FAKE_GIF);
    assert_eq!(session.status(), &Status::Complete);
    assert_eq!(session.status().text(), "轉換完成！");

    session.select(vec![video("clip.mp4")]);
    assert!(session.last_result().is_none());
    assert_eq!(session.status(), &Status::Waiting);
    session.convert(&RawOptions::default()).await.unwrap();
    assert!(session.last_result().is_some());

    assert!(session.engine_ready());
    assert_eq!(session.engine().snapshot(|s| s.loads), 1);

    let events = events.lock().unwrap();
    assert!(events.iter().any(|e| matches!(e, EngineEvent::Log(_))));
    assert!(events.contains(&EngineEvent::Progress(1.0)));
}

#[tokio::test]
async fn raw_options_are_normalized_before_conversion() {
    let mut session = session(MockEngine::new());
    session.select(vec![video("clip.mov")]);
    let raw = RawOptions {
        width: "319.6".to_string(),
        frame_rate: "120".to_string(),
        quality: "0".to_string(),
        loop_count: "-3".to_string(),
        ..RawOptions::default()
    };

    session.convert(&raw).await.unwrap();

    let encode = session.engine().snapshot(|s| s.execs[1].clone());
    let joined = encode.join(" ");
    assert!(joined.contains("fps=60,scale=320:-1:flags=lanczos"), "{}", joined);
    assert!(joined.contains("-q:v 1"), "{}", joined);
    assert!(joined.contains("-loop 0"), "{}", joined);
}

#[tokio::test]
async fn engine_failure_is_reported_in_status() {
    let mut session = session(MockEngine {
        fail_exec_at: Some((0, "Conversion failed!".to_string())),
        ..MockEngine::new()
    });
    session.select(vec![video("clip.avi")]);

    let err = session.convert(&RawOptions::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "Conversion failed!");
    assert_eq!(session.status(), &Status::Failed("Conversion failed!".to_string()));
    assert_eq!(session.status().text(), "轉換失敗：Conversion failed!");
    assert!(session.last_result().is_none());
}

#[tokio::test]
async fn load_failure_leaves_engine_unloaded() {
    let mut session = session(MockEngine {
        fail_load: Some("找不到 ffmpeg".to_string()),
        ..MockEngine::new()
    });
    session.select(vec![video("clip.mp4")]);

    let err = session.convert(&RawOptions::default()).await.unwrap_err();
    assert!(matches!(err, ConvertError::EngineLoad(_)));
    assert!(!session.engine_ready());
    assert!(matches!(session.status(), Status::Failed(_)));

    // 下一次轉換會重新嘗試載入
    let _ = session.convert(&RawOptions::default()).await;
    assert_eq!(session.engine().snapshot(|s| s.loads), 2);
}
