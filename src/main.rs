fn main() {
    dioxus::launch(log_sentinel::components::App);
}
