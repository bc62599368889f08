use std::sync::Arc;
use std::time::Duration;

use zoom_lock::{
    indicator::InMemoryIndicator,
    storage::InMemorySettingsStore,
    tab::{ChangeInfo, InMemoryTabService, TabInfo},
    EngineConfig, EngineError, EngineEvent, EngineServices, HostEvent, InstallReason, LogLevel,
    ZoomLockEngine,
};

#[tokio::main]
async fn main() -> Result<(), EngineError> {
    env_logger::init();

    // The in-memory services stand in for the browser. A real host would forward its tab,
    // storage and badge APIs through the same traits.
    let tabs = Arc::new(InMemoryTabService::new());
    let store = Arc::new(InMemorySettingsStore::new());
    let badge = Arc::new(InMemoryIndicator::new());

    let docs = tabs.open_tab("https://docs.rs");
    let news = tabs.open_tab("https://news.ycombinator.com");
    let _settings = tabs.open_tab("chrome://settings");

    let engine_cfg = EngineConfig::builder()
        .privileged_scheme("chrome-extension:")
        .log_level(LogLevel::Debug)
        .build()?;

    let engine = ZoomLockEngine::new(
        Some(engine_cfg),
        EngineServices {
            tabs: tabs.clone(),
            store: store.clone(),
            indicator: badge.clone(),
        },
    );

    let mut event_rx = engine.subscribe_events();
    let (handle, join_handle) = engine.start()?;

    let printer = tokio::spawn(async move {
        while let Ok(ev) = event_rx.recv().await {
            println!("[event] {:?}", ev);
            if matches!(ev, EngineEvent::EngineShutdown { .. }) {
                break;
            }
        }
    });

    // First install: unlocked, badge shows "off"
    handle.dispatch(HostEvent::Installed { reason: InstallReason::Install }).await?;

    // The user zooms the docs tab to 125% and locks it there
    let old = tabs.user_zoom(docs.id, 1.25).unwrap_or(1.0);
    handle
        .dispatch(HostEvent::ZoomChanged { tab_id: docs.id, old_zoom_factor: old, new_zoom_factor: 1.25 })
        .await?;
    handle.dispatch(HostEvent::ActionClicked { tab: docs.clone() }).await?;

    // A new tab opens and follows the lock
    let fresh = tabs.open_tab("https://crates.io");
    handle.dispatch(HostEvent::TabCreated { tab: fresh.clone() }).await?;

    // Zooming any tab while locked moves the lock for everybody
    let old = tabs.user_zoom(news.id, 1.5).unwrap_or(1.0);
    handle
        .dispatch(HostEvent::ZoomChanged { tab_id: news.id, old_zoom_factor: old, new_zoom_factor: 1.5 })
        .await?;

    // Navigation re-applies the lock
    handle
        .dispatch(HostEvent::TabUpdated {
            tab_id: fresh.id,
            change_info: ChangeInfo { url: Some("https://crates.io/crates/tokio".into()), ..Default::default() },
            tab: TabInfo::new(fresh.id, "https://crates.io/crates/tokio"),
        })
        .await?;

    tokio::time::sleep(Duration::from_millis(100)).await;

    println!("Shutting down engine...");
    handle.shutdown().await?;

    if let Err(join_err) = join_handle.await {
        eprintln!("engine task panicked: {join_err}");
    }
    let _ = printer.await;

    for tab in [&docs, &news, &fresh] {
        println!("{} -> zoom {:?}", tab.url, tabs.zoom_of(tab.id));
    }
    println!("Badge: {:?}", badge.text());
    println!("Stored: {:?}", store.snapshot());

    Ok(())
}
