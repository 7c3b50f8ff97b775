fn main() {
    // Only the device build needs the ESP-IDF environment; host builds
    // (library + tests) skip it entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
