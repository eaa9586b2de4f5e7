//! Demo that pushes one sample alert through the Telegram notifier
//! (logs a warning instead when TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID are unset).

use viral_news_watch::analyze::assess;
use viral_news_watch::{Alert, Notifier, TelegramNotifier};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();
    let notifier = TelegramNotifier::from_env();

    let title = "URGENT crisis: war explosion rocks capital";
    let a = assess(title);
    let alert = Alert {
        score: a.score,
        topic: a.topic.to_string(),
        title: title.to_string(),
        link: "https://example.com/demo".to_string(),
    };

    match notifier.send(&alert).await {
        Ok(()) => println!("notify-demo done ({notifier:?})"),
        Err(e) => eprintln!("notify-demo failed: {e:#}"),
    }
}
