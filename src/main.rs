#[tokio::main]
async fn main() {
  if let Err(e) = workout_now_lib::run().await {
    eprintln!("workout-now: {}", e);
    std::process::exit(1);
  }
}
