pub mod error;

pub mod service {
    pub mod config_service;
    pub mod ffmpeg_engine;
    pub mod workspace;

    pub mod traits {
        pub mod i_engine;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod action {
    pub mod cli;
    pub mod interactive;
    pub mod session;
}

pub mod facade {
    pub mod conversion_facade;
}

pub mod models {
    pub mod conversion;
    pub mod engine;
    pub mod file;
}

pub mod server {
    pub mod static_server;
}

pub mod utils {
    pub mod classify;
    pub mod command;
    pub mod convert;
    pub mod file;
    pub mod options;
    pub mod utils;
}
