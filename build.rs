fn main() {
    // Rerun if the embedded web client changes
    println!("cargo:rerun-if-changed=frontend/");

    let frontend_path = std::path::Path::new("frontend");
    if !frontend_path.exists() {
        eprintln!("Warning: frontend/ directory not found.");
        eprintln!("Build the web client and copy its dist/* output to frontend/");

        // Placeholder so the relay still serves something at `/`
        std::fs::create_dir_all("frontend").ok();
        std::fs::write(
            "frontend/index.html",
            r#"<!DOCTYPE html>
<html>
<head>
    <title>API Client</title>
    <style>
        body { font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: #f8fafc; color: #0f172a; }
        .message { text-align: center; }
        code { background: #e2e8f0; padding: 2px 8px; border-radius: 4px; }
    </style>
</head>
<body>
    <div class="message">
        <h1>API Client Relay</h1>
        <p>The relay is running. No web client is embedded.</p>
        <p>Endpoints:</p>
        <ul style="text-align: left;">
            <li><code>POST /api/proxy</code> relays one HTTP request</li>
            <li><code>POST /api/generate-json</code> drafts a JSON body from a description</li>
            <li><code>GET /api/health</code></li>
        </ul>
        <p>From a terminal: <code>api-client send GET https://example.com</code></p>
    </div>
</body>
</html>"#,
        )
        .ok();
    }
}
