fn main() {
    dialect_coverage::cli::run();
}
