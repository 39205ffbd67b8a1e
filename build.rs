#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    // res/rgeologger.ico must exist
    let mut res = WindowsResource::new();
    res.set_icon("res/rgeologger.ico")
        .set("FileDescription", "rGeologger CLI")
        .set("ProductName", "rGeologger")
        .set("OriginalFilename", "rgeologger.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed icon resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
