//! Interactive read-eval-print loop over stdin.

use anyhow::Result;
use askdb_backend::Database;
use askdb_llm::TextToSql;
use std::io::{self, BufRead, Write};

/// Prompt for questions until `quit`/`exit`/`q` or end of input. Errors are
/// printed and the loop continues.
pub async fn run_demo(backend: &dyn Database, generator: &dyn TextToSql) -> Result<()> {
    println!("{}", "=".repeat(60));
    println!("TEXT-TO-SQL DEMO");
    println!("{}", "=".repeat(60));
    match backend.describe_schema().await {
        Ok(schema) if !schema.is_empty() => println!("Schema:\n{schema}"),
        Ok(_) => println!("Schema: (no tables)"),
        Err(err) => println!("Schema unavailable: {err}"),
    }
    println!("Type 'quit' to exit\n");

    let stdin = io::stdin();
    loop {
        print!("\nQuestion: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }

        let sql = match generator.generate_sql(question).await {
            Ok(sql) => sql,
            Err(err) => {
                println!("\nError: {err}");
                continue;
            }
        };
        println!("\nSQL: {sql}");

        match backend.execute_sql(&sql).await {
            Ok(result) => println!("\nResult:\n{result}"),
            Err(err) => println!("\nError: {err}"),
        }
    }

    println!("\nBye!");
    Ok(())
}
