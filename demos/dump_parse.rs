use ledger::model::{format_sums, sum_transactions};
use ledger::parse_reader;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let filename = std::env::args().nth(1).ok_or("filename argument")?;
    let file = parse_reader(std::fs::File::open(filename)?)?;

    dbg!(&file);

    let sums = sum_transactions(file.transactions())?;
    for (account, value) in format_sums(&sums, "  ") {
        println!("{:<50} {}", account, value);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        println!("Error: {}", e);
    }
}
