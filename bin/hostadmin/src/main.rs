#[tokio::main]
async fn main() -> Result<(), eyre::Report> {
    hostadmin::run().await
}
