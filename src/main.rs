fn main() {
    prompt_decorators::app::cli::run();
}
