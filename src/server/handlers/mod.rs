pub mod rides;

pub async fn health() -> &'static str {
    "Healthy"
}
