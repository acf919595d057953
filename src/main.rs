fn main() -> anyhow::Result<()> {
    todos::cli::run()
}
