fn main() {
    std::process::exit(drag_scroll_lib::run());
}
