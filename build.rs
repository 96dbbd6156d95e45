fn main() {
    // Propagates the ESP-IDF build environment (chip, toolchain paths) to
    // dependent crates when targeting espidf. No-op on host builds.
    embuild::espidf::sysenv::output();
}
