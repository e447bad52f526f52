use std::process::ExitCode;

fn main() -> ExitCode {
    match repofetch::cli::run() {
        Ok(code) => code,
        Err(e) => {
            repofetch::ui::output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
