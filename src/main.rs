fn main() -> anyhow::Result<()> {
    rivescript_parser::run()
}
