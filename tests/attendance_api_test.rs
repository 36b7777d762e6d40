use digiling::api::{AttendanceHttpClient, AttendanceService};

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored (needs a live deployment)
async fn fetch_today_against_live_service() {
    dotenvy::dotenv().ok();

    let base_url = std::env::var("DIGILING_API_URL").expect("DIGILING_API_URL must be set");
    let token = std::env::var("DIGILING_TOKEN").expect("DIGILING_TOKEN must be set");

    let client = AttendanceHttpClient::new(base_url, token).expect("failed to build client");
    let record = client.today().await.expect("today endpoint failed");

    println!("today's record: {:?}", record);
}
