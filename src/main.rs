fn main() -> std::io::Result<()> {
    lead_routing_lib::run()
}
