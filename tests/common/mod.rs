#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use any_to_gif::error::{ConvertError, ConvertResult, EngineIoKind};
use any_to_gif::models::engine::{EngineEvent, EngineResources, EventListener};
use any_to_gif::models::file::SourceFile;
use any_to_gif::service::traits::i_engine::Engine;

pub const FAKE_GIF: &[u8] = b"GIF89a-mock";

#[derive(Default, Debug)]
pub struct MockState {
    pub files: HashMap<String, Vec<u8>>,
    pub loads: usize,
    pub writes: Vec<String>,
    pub reads: Vec<String>,
    pub deletes: Vec<String>,
    pub execs: Vec<Vec<String>>,
}

/// 記錄所有呼叫的假引擎；`-y` 之後的檔名視為輸出並寫入假內容
#[derive(Default)]
pub struct MockEngine {
    pub loaded: bool,
    pub state: Mutex<MockState>,
    pub listeners: Vec<EventListener>,
    pub fail_load: Option<String>,
    pub fail_exec_at: Option<(usize, String)>,
    pub fail_write: Option<(String, String)>,
    pub fail_read: Option<String>,
    pub fail_delete: Option<String>,
}

impl MockEngine {
    pub fn new() -> Self {
        MockEngine::default()
    }

    pub fn loaded() -> Self {
        MockEngine {
            loaded: true,
            ..MockEngine::default()
        }
    }

    pub fn failing_exec(index: usize, message: &str) -> Self {
        MockEngine {
            loaded: true,
            fail_exec_at: Some((index, message.to_string())),
            ..MockEngine::default()
        }
    }

    pub fn snapshot<T>(&self, f: impl FnOnce(&MockState) -> T) -> T {
        f(&self.state.lock().unwrap())
    }

    fn emit(&self, event: EngineEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    fn not_loaded() -> ConvertError {
        ConvertError::engine_io(EngineIoKind::NotLoaded, "engine not loaded")
    }
}

fn input_present(files: &HashMap<String, Vec<u8>>, name: &str) -> bool {
    if name.contains("%05d") {
        files.contains_key(&name.replace("%05d", "00001"))
    } else {
        files.contains_key(name)
    }
}

impl Engine for MockEngine {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    async fn load(&mut self, _resources: &EngineResources) -> ConvertResult<()> {
        self.state.lock().unwrap().loads += 1;
        if let Some(message) = &self.fail_load {
            return Err(ConvertError::engine_load(message.clone()));
        }
        self.loaded = true;
        Ok(())
    }

    async fn write_file(&self, name: &str, data: Vec<u8>) -> ConvertResult<()> {
        if !self.loaded {
            return Err(Self::not_loaded());
        }
        let mut state = self.state.lock().unwrap();
        state.writes.push(name.to_string());
        if let Some((target, message)) = &self.fail_write {
            if target == name {
                return Err(ConvertError::engine_io(EngineIoKind::Other, message.clone()));
            }
        }
        state.files.insert(name.to_string(), data);
        Ok(())
    }

    async fn read_file(&self, name: &str) -> ConvertResult<Vec<u8>> {
        if !self.loaded {
            return Err(Self::not_loaded());
        }
        let mut state = self.state.lock().unwrap();
        state.reads.push(name.to_string());
        if let Some(message) = &self.fail_read {
            return Err(ConvertError::engine_io(EngineIoKind::Other, message.clone()));
        }
        state
            .files
            .get(name)
            .cloned()
            .ok_or_else(|| ConvertError::engine_io(EngineIoKind::NotFound, format!("ENOENT: {}", name)))
    }

    async fn delete_file(&self, name: &str) -> ConvertResult<()> {
        if !self.loaded {
            return Err(Self::not_loaded());
        }
        let mut state = self.state.lock().unwrap();
        state.deletes.push(name.to_string());
        if let Some(message) = &self.fail_delete {
            return Err(ConvertError::engine_io(EngineIoKind::Other, message.clone()));
        }
        match state.files.remove(name) {
            Some(_) => Ok(()),
            None => Err(ConvertError::engine_io(EngineIoKind::NotFound, format!("ENOENT: {}", name))),
        }
    }

    async fn exec(&self, args: &[String]) -> ConvertResult<()> {
        if !self.loaded {
            return Err(ConvertError::engine_exec("engine not loaded"));
        }
        let index = {
            let mut state = self.state.lock().unwrap();
            state.execs.push(args.to_vec());
            state.execs.len() - 1
        };
        self.emit(EngineEvent::Log(format!("exec #{}", index)));

        if let Some((fail_index, message)) = &self.fail_exec_at {
            if *fail_index == index {
                return Err(ConvertError::engine_exec(message.clone()));
            }
        }

        let mut state = self.state.lock().unwrap();
        for pair in args.windows(2) {
            if pair[0] == "-i" && !input_present(&state.files, &pair[1]) {
                return Err(ConvertError::engine_exec(format!("{}: No such file or directory", pair[1])));
            }
        }
        if let Some(pos) = args.iter().position(|a| a == "-y") {
            if let Some(output) = args.get(pos + 1) {
                let content = if output.ends_with(".gif") { FAKE_GIF.to_vec() } else { b"PALETTE".to_vec() };
                state.files.insert(output.clone(), content);
            }
        }
        drop(state);
        self.emit(EngineEvent::Progress(0.5));
        self.emit(EngineEvent::Progress(1.0));
        Ok(())
    }

    fn on_event(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }
}

pub fn png(name: &str, marker: u8) -> SourceFile {
    SourceFile::from_bytes(name, "image/png", vec![0x89, b'P', b'N', b'G', marker])
}

pub fn video(name: &str) -> SourceFile {
    SourceFile::from_bytes(name, "video/mp4", b"ftypisom".to_vec())
}

/// 收集事件的監聽器
pub fn recorder() -> (EventListener, Arc<Mutex<Vec<EngineEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let listener: EventListener = Arc::new(move |event: &EngineEvent| {
        sink.lock().unwrap().push(event.clone());
    });
    (listener, events)
}

pub fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
