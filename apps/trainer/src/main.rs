#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quiz_trainer::run().await
}
