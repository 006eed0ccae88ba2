fn main() -> std::process::ExitCode {
    snaplaunch::cli::run().into()
}
