use storefront_report::run_report;

fn main() {
    if let Err(error) = run_report() {
        eprintln!("error: {error:?}");
        std::process::exit(1);
    }
}
