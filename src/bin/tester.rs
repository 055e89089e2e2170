use clap::Parser;
use reqwest::Client;
use zorodoor::{
    flow::{FlowState, LandingFlow},
    scratch::ScratchCard,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, default_value = "Test User")]
    name: String,

    #[arg(long, default_value = "1234567890")]
    number: String,

    #[arg(long, default_value = "tester@example.com")]
    email: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut flow = LandingFlow::new();
    flow.open_form().unwrap();

    flow.form.name = args.name;
    flow.form.number = args.number;
    flow.form.email = args.email;

    println!("Submitting to {}", args.base_url);

    let http = Client::new();
    flow.submit(&http, &args.base_url).await.unwrap();

    if let Some(notice) = flow.take_notice() {
        println!("Submission failed: {notice}");
        return;
    }

    let discount = flow.discount().unwrap();
    println!("Submission stored, discount: {discount}%");

    let mut card = ScratchCard::default().on_complete(|reward| {
        println!("Revealed! {reward}% OFF");
    });

    card.pointer_down();

    // Scripted scratch session, left to right in 10px strokes.
    for y in (0..card.height()).step_by(10) {
        for x in (0..card.width()).step_by(10) {
            card.pointer_move(x as f32, y as f32);
        }

        card.pointer_up();

        if card.is_revealed() {
            break;
        }

        card.pointer_down();
    }

    assert_eq!(flow.state(), FlowState::ScratchCardShown);
    println!("Coverage at reveal: {:.2}", card.coverage());
}
