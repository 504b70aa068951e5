use chrono::NaiveDate;
use clap::Parser;
use hotel_dd::utils::logger;
use hotel_dd::{quote, StayRequest};

#[derive(Debug, Parser)]
#[command(name = "quote")]
#[command(about = "Computes nights and total price for a stay")]
struct QuoteArgs {
    #[arg(long)]
    check_in: NaiveDate,

    #[arg(long)]
    check_out: NaiveDate,

    #[arg(long)]
    nightly_rate: f64,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

fn main() {
    let args = QuoteArgs::parse();
    logger::init_cli_logger(args.verbose);

    let stay = StayRequest {
        check_in: args.check_in,
        check_out: args.check_out,
        nightly_rate: args.nightly_rate,
    };

    match quote(&stay) {
        Ok(price) => {
            println!(
                "{} night(s) at {:.2} per night: total {:.2}",
                price.nights, stay.nightly_rate, price.total
            );
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
