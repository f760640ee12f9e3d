fn main() -> anyhow::Result<()> {
    simlink_ls::entrypoint()
}
