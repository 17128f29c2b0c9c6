mod commands;
mod session_state;
mod settings;
mod status;
mod summarizer_client;
mod summary;
mod transcript;

use env_filter::Builder as EnvFilterBuilder;
use specta_typescript::{BigIntExportBehavior, Typescript};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Mutex;
use tauri::{AppHandle, Manager};
use tauri_plugin_log::{Builder as LogBuilder, RotationStrategy, Target, TargetKind};
use tauri_specta::{collect_commands, Builder};

use session_state::SessionState;

// Global atomic to store the file log level filter
// We use u8 to store the log::LevelFilter as a number
pub static FILE_LOG_LEVEL: AtomicU8 = AtomicU8::new(log::LevelFilter::Debug as u8);

/// The session state is a single aggregate value guarded by one mutex; every
/// command locks it, applies a transition, and emits the updated snapshot.
pub type ManagedSessionState = Mutex<SessionState>;

fn level_filter_from_u8(value: u8) -> log::LevelFilter {
    match value {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        5 => log::LevelFilter::Trace,
        _ => log::LevelFilter::Trace,
    }
}

fn build_console_filter() -> env_filter::Filter {
    let mut builder = EnvFilterBuilder::new();

    match std::env::var("RUST_LOG") {
        Ok(spec) if !spec.trim().is_empty() => {
            if let Err(err) = builder.try_parse(&spec) {
                log::warn!(
                    "Ignoring invalid RUST_LOG value '{}': {}. Falling back to info-level console logging",
                    spec,
                    err
                );
                builder.filter_level(log::LevelFilter::Info);
            }
        }
        _ => {
            builder.filter_level(log::LevelFilter::Info);
        }
    }

    builder.build()
}

fn show_main_window(app: &AppHandle) {
    if let Some(main_window) = app.get_webview_window("main") {
        if let Err(e) = main_window.show() {
            log::error!("Failed to show window: {}", e);
        }
        if let Err(e) = main_window.set_focus() {
            log::error!("Failed to focus window: {}", e);
        }
    } else {
        log::error!("Main window not found.");
    }
}

pub fn run() {
    // Parse console logging directives from RUST_LOG, falling back to info-level logging
    // when the variable is unset
    let console_filter = build_console_filter();

    let specta_builder = Builder::<tauri::Wry>::new().commands(collect_commands![
        commands::get_app_settings,
        commands::get_default_settings,
        commands::set_backend_base_url,
        commands::set_log_level,
        commands::get_session_state,
        commands::transcript::load_transcript_file,
        commands::transcript::set_transcript_text,
        commands::transcript::set_instruction,
        commands::session::generate_summary,
        commands::session::refine_summary,
        commands::edit::update_detailed_summary,
        commands::edit::update_bullet_point,
        commands::edit::update_note,
        commands::edit::add_bullet_point,
        commands::edit::remove_bullet_point,
        commands::export::copy_summary_to_clipboard,
        commands::export::download_summary,
        commands::export::email_summary,
    ]);

    #[cfg(debug_assertions)] // <- Only export on non-release builds
    specta_builder
        .export(
            Typescript::default().bigint(BigIntExportBehavior::Number),
            "ui/src/bindings.ts",
        )
        .expect("Failed to export typescript bindings");

    let mut builder = tauri::Builder::default().plugin(
        LogBuilder::new()
            .level(log::LevelFilter::Trace) // Set to most verbose level globally
            .max_file_size(500_000)
            .rotation_strategy(RotationStrategy::KeepOne)
            .clear_targets()
            .targets([
                // Console output respects RUST_LOG environment variable
                Target::new(TargetKind::Stdout).filter({
                    let console_filter = console_filter.clone();
                    move |metadata| console_filter.enabled(metadata)
                }),
                // File logs respect the user's settings (stored in FILE_LOG_LEVEL atomic)
                Target::new(TargetKind::LogDir {
                    file_name: Some("easysummarize".into()),
                })
                .filter(|metadata| {
                    let file_level = FILE_LOG_LEVEL.load(Ordering::Relaxed);
                    metadata.level() <= level_filter_from_u8(file_level)
                }),
            ])
            .build(),
    );

    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    {
        builder = builder.plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            show_main_window(app);
        }));
    }

    builder
        .plugin(tauri_plugin_clipboard_manager::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_store::Builder::default().build())
        .manage(ManagedSessionState::default())
        .setup(move |app| {
            let settings = settings::load_or_create_app_settings(app);
            FILE_LOG_LEVEL.store(settings.log_level.to_level_filter() as u8, Ordering::Relaxed);

            log::info!(
                "EasySummarize started (backend: {})",
                settings::resolve_backend_base_url(&settings.backend_base_url)
            );

            Ok(())
        })
        .invoke_handler(specta_builder.invoke_handler())
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
