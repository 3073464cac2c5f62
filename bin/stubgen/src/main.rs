fn main() -> anyhow::Result<()> {
    stubgen_driver::main()
}
