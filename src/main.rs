fn main() {
    dash_game::game::run();
}
