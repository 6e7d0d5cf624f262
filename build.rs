fn main() {
    // Migrations are embedded with sqlx::migrate!, so a change to any file
    // under migrations/ must trigger a rebuild.
    println!("cargo:rerun-if-changed=migrations");
}
