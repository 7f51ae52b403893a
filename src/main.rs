fn main() {
    bullet_patterns::game::run();
}
