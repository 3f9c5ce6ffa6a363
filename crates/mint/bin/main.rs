fn main() -> eyre::Result<()> {
    nft_mint::args::run()
}
