use owo_colors::OwoColorize as _;

fn main() {
  if let Err(err) = servald_cmd::run() {
    anstream::eprintln!("{}", format!("{err:#}").red());
    std::process::exit(1);
  }
}
