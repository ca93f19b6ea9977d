use naira_saas::server;

#[tokio::main]
async fn main() {
    if let Err(e) = server::run().await {
        eprintln!("naira-saas failed to start: {e}");
        std::process::exit(1);
    }
}
