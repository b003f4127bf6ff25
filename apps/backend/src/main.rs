#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tutor_backend::run().await
}
