#[tokio::main]
async fn main() {
    zorodoor::start_server().await;
}
