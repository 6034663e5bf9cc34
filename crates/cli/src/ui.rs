use std::io::{self, Write};

use anyhow::Result;
use courier_engine::{Agent, ModelBackend};
use crossterm::style::Stylize;

pub async fn single_prompt<B: ModelBackend>(agent: &Agent<B>, prompt: &str) -> Result<()> {
    let response = agent.work(prompt).await?;
    println!("{}", response.cyan());
    Ok(())
}

pub async fn interactive<B: ModelBackend>(agent: &Agent<B>) -> Result<()> {
    let stdin = io::stdin();

    loop {
        print!("Ask me anything: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            println!();
            break;
        }
        let input = input.trim();

        if input.eq_ignore_ascii_case("exit") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        match agent.work(input).await {
            Ok(response) => println!("{}", response.cyan()),
            Err(e) => eprintln!("{}", format!("Error: {e}").red()),
        }
    }

    Ok(())
}
