use anyhow::Result;

fn main() -> Result<()> {
    autofill_replay::cli::app::run()
}
