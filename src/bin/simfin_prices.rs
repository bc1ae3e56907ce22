use simfin_prices::config::Config;
use simfin_prices::http::ReqwestTransport;
use simfin_prices::logging;
use simfin_prices::services::price_fetcher::PriceFetcher;
use simfin_prices::util;

use clap::{App, Arg, SubCommand};
use log::{error, info, LevelFilter};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Console logging for the binary itself; the fetcher gets its own file logger
    env_logger::init();

    let app = App::new("simfin_prices")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fetch recent closing prices from SimFin")
        .subcommand(
            SubCommand::with_name("prices")
                .about("Show the last closing prices of a ticker in a date range")
                .arg(
                    Arg::with_name("ticker")
                        .short('t')
                        .long("ticker")
                        .value_name("TICKER")
                        .help("Ticker symbol, e.g. AAPL")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("start")
                        .short('s')
                        .long("start")
                        .value_name("DATE")
                        .help("Initial date (YYYY-MM-DD)")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("end")
                        .short('e')
                        .long("end")
                        .value_name("DATE")
                        .help("Final date (YYYY-MM-DD)")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("log-file")
                        .long("log-file")
                        .value_name("PATH")
                        .help("File the fetcher appends its diagnostics to")
                        .takes_value(true)
                        .default_value("app.log"),
                )
                .arg(
                    Arg::with_name("timeout")
                        .long("timeout")
                        .value_name("SECS")
                        .help("Request timeout in seconds (unbounded if omitted)")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("base-url")
                        .long("base-url")
                        .value_name("URL")
                        .help("Override the API host")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("bounds")
                .about("Print the supported date range"),
        );

    let matches = app.get_matches();

    if let Some(matches) = matches.subcommand_matches("prices") {
        let ticker = matches.value_of("ticker").unwrap_or_default();
        let start = matches.value_of("start").unwrap_or_default();
        let end = matches.value_of("end").unwrap_or_default();
        let log_file = matches.value_of("log-file").unwrap_or("app.log");

        let mut config = Config::from_env()?;
        if let Some(url) = matches.value_of("base-url") {
            config = config.with_base_url(url);
        }
        if let Some(secs) = matches.value_of("timeout") {
            let secs = secs.parse::<u64>()?;
            config = config.with_request_timeout(Some(Duration::from_secs(secs)));
        }
        info!("Using {:?}", config);

        let transport = Arc::new(ReqwestTransport::new(config.request_timeout)?);
        let fetcher = PriceFetcher::new(config, transport)?
            .with_logger(logging::file_logger(log_file, LevelFilter::Debug)?);

        match fetcher.get_closing_prices(ticker, start, end).await {
            Ok(summary) => println!("{}", summary),
            Err(e) => {
                error!("Price lookup for {} failed: {}", ticker, e);
                return Err(e.into());
            }
        }
    } else if matches.subcommand_matches("bounds").is_some() {
        println!(
            "Supported dates: {} to {}",
            util::min_supported_date(),
            util::max_supported_date()
        );
    } else {
        info!("No command specified. Use --help for usage information.");
    }

    Ok(())
}
