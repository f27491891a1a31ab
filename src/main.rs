fn main() {
    wellness_journey_lib::run()
}
