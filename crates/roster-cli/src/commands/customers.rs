use crate::commands::{print_json, Context};
use crate::error::{duplicate_email, not_found};
use anyhow::Result;
use clap::Args;
use roster_core::domain::CustomerId;
use roster_core::dto::{ValidationFailedDto, MSG_NOT_FOUND};
use roster_core::rules::{validate, ValidationResult};
use roster_core::CoreError;
use roster_store::repo::{CreateOutcome, CustomerTable};
use std::str::FromStr;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long, visible_alias = "nome")]
    pub name: String,
    #[arg(long)]
    pub email: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

pub fn add_customer(ctx: &Context<'_>, args: AddArgs) -> Result<()> {
    let customer = match validate(&args.name, &args.email) {
        ValidationResult::Valid(customer) => customer,
        ValidationResult::Invalid(errors) => {
            if ctx.json {
                print_json(&ValidationFailedDto::from(errors.clone()))?;
            } else {
                for (field, messages) in errors.iter() {
                    for message in messages {
                        eprintln!("{field}: {message}");
                    }
                }
            }
            return Err(CoreError::Validation(errors).into());
        }
    };

    match ctx.store.customers().create(&customer)? {
        CreateOutcome::Created(created) => {
            if ctx.json {
                print_json(&created)?;
            } else {
                println!("created {} {} {}", created.id, created.name, created.email);
            }
            Ok(())
        }
        CreateOutcome::DuplicateEmail => Err(duplicate_email(customer.email())),
    }
}

pub fn list_customers(ctx: &Context<'_>) -> Result<()> {
    let customers = ctx.store.customers().list()?;
    if ctx.json {
        return print_json(&customers);
    }
    if customers.is_empty() {
        println!("no customers");
        return Ok(());
    }
    let width = customers
        .iter()
        .map(|customer| customer.id.to_string().len())
        .max()
        .unwrap_or(1);
    for customer in &customers {
        println!(
            "{:>width$}  {}  <{}>",
            customer.id.to_string(),
            customer.name,
            customer.email,
            width = width
        );
    }
    Ok(())
}

pub fn show_customer(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = CustomerId::from_str(&args.id)?;
    let Some(customer) = ctx.store.customers().get(id)? else {
        return Err(not_found(format!("{MSG_NOT_FOUND} ({id})")));
    };
    if ctx.json {
        print_json(&customer)?;
    } else {
        println!("id:    {}", customer.id);
        println!("nome:  {}", customer.name);
        println!("email: {}", customer.email);
    }
    Ok(())
}
