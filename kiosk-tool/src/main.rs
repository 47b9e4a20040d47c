use colored::*;
use serde_json::{json, Value};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "🎫 Estación de Registro - Consola".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url =
        std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    println!("API: {}", base_url.bright_cyan());

    let client = reqwest::Client::new();

    // Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚌 Elegir ruta");
        println!("2. 🎫 Registrar códigos");
        println!("3. 📄 Ver asistencia de hoy");
        println!("4. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-4): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        match choice.trim() {
            "1" => {
                if let Err(e) = select_trip(&client, &base_url).await {
                    println!("{} {}", "❌ Error:".bright_red(), e);
                }
            }
            "2" => {
                if let Err(e) = register_loop(&client, &base_url).await {
                    println!("{} {}", "❌ Error:".bright_red(), e);
                }
            }
            "3" => {
                if let Err(e) = show_attendance(&client, &base_url).await {
                    println!("{} {}", "❌ Error:".bright_red(), e);
                }
            }
            "4" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
            }
        }
    }

    Ok(())
}

async fn select_trip(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let trips: Vec<Value> = client
        .get(format!("{}/api/trip", base_url))
        .send()
        .await?
        .json()
        .await?;

    if trips.is_empty() {
        println!("{}", "No hay rutas activas.".bright_yellow());
        return Ok(());
    }

    println!();
    println!("{}", "🚌 RUTAS ACTIVAS".bright_cyan().bold());
    for (i, trip) in trips.iter().enumerate() {
        println!(
            "{}. {}",
            i + 1,
            trip["label"].as_str().unwrap_or("(sin label)")
        );
    }
    println!("0. Sin ruta (variante simple por día)");
    print!("{}", "Elige una ruta: ".bright_yellow());
    io::stdout().flush()?;

    let mut choice = String::new();
    io::stdin().read_line(&mut choice)?;
    let trip_id = match choice.trim().parse::<usize>() {
        Ok(0) => None,
        Ok(n) if n <= trips.len() => trips[n - 1]["id"].as_str().map(str::to_string),
        _ => {
            println!("{}", "❌ Opción inválida.".bright_red());
            return Ok(());
        }
    };

    let response = client
        .put(format!("{}/api/checkin/trip", base_url))
        .json(&json!({ "trip_id": trip_id }))
        .send()
        .await?;

    if response.status().is_success() {
        println!(
            "{} {}",
            "✅ Ruta seleccionada:".bright_green(),
            trip_id.as_deref().unwrap_or("(ninguna)")
        );
    } else {
        let body: Value = response.json().await?;
        println!(
            "{} {}",
            "❌".bright_red(),
            body["message"].as_str().unwrap_or("error desconocido")
        );
    }
    Ok(())
}

async fn register_loop(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", "Dirección por defecto (IDA/VUELTA): ".bright_yellow());
    io::stdout().flush()?;
    let mut direction = String::new();
    io::stdin().read_line(&mut direction)?;
    let direction = direction.trim().to_uppercase();
    let direction = if direction == "VUELTA" { "VUELTA" } else { "IDA" };

    println!();
    println!(
        "{}",
        "Escanea o tipea códigos (enter vacío para volver):".bright_cyan()
    );

    loop {
        print!("{}", "Código: ".bright_yellow());
        io::stdout().flush()?;

        let mut code = String::new();
        io::stdin().read_line(&mut code)?;
        let code = code.trim();
        if code.is_empty() {
            break;
        }

        let response = client
            .post(format!("{}/api/checkin", base_url))
            .json(&json!({ "code": code, "direction": direction }))
            .send()
            .await?;

        let body: Value = response.json().await?;
        if body["success"] == true {
            println!(
                "{} {}",
                "✅".bright_green(),
                body["message"].as_str().unwrap_or("registrado")
            );
        } else {
            println!(
                "{} {}",
                "❌".bright_red(),
                body["message"].as_str().unwrap_or("no registrado")
            );
        }
    }
    Ok(())
}

async fn show_attendance(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries: Vec<Value> = client
        .get(format!("{}/api/checkin/attendance", base_url))
        .send()
        .await?
        .json()
        .await?;

    println!();
    println!("{}", "📄 ASISTENCIA DE HOY".bright_cyan().bold());
    if entries.is_empty() {
        println!("{}", "Aún no hay registros hoy.".bright_yellow());
        return Ok(());
    }

    for entry in &entries {
        println!(
            "• {} [{}] {} ({})",
            entry["name"].as_str().unwrap_or("(Sin nombre)"),
            entry["code"].as_str().unwrap_or(""),
            entry["direction"].as_str().unwrap_or(""),
            entry["timestamp"].as_i64().unwrap_or(0)
        );
    }
    println!("Total: {}", entries.len().to_string().bright_green());
    Ok(())
}
