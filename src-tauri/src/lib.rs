mod commands;
mod error;
mod models;
mod services;

use ailbums_core::{CullSession, HttpAnalysisClient, ServiceConfig};
use error::AppError;
use tauri::Manager;

pub type AppSession = CullSession<HttpAnalysisClient>;

fn build_session() -> Result<AppSession, AppError> {
    let config = ServiceConfig::from_env()?;
    let client = HttpAnalysisClient::new(&config)?;
    log::info!("Submitting images to {}", client.cull_url());
    Ok(CullSession::new(client))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let session = build_session().expect("Failed to configure the analysis client");

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .manage(session)
        .setup(|app| {
            let session = app.state::<AppSession>();
            services::events::forward_session_updates(app.handle(), &session);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::assets::pick_assets,
            commands::assets::select_assets,
            commands::assets::select_folder,
            commands::assets::get_selection,
            commands::filters::get_filters,
            commands::filters::update_filters,
            commands::batch::start_batch,
            commands::batch::get_batch_state,
            commands::batch::get_result_tiles,
            commands::batch::get_batch_summary,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
