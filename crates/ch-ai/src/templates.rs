use ch_deploy::Provider;

use crate::{CodeFlavor, GeneratedCode};

const S3_TEMPLATE: &str = r#"# AWS S3 Bucket Configuration
resource "aws_s3_bucket" "main_bucket" {
  bucket = "my-app-storage-bucket"

  tags = {
    Name        = "Main Storage"
    Environment = "production"
  }
}

resource "aws_s3_bucket_versioning" "main_bucket_versioning" {
  bucket = aws_s3_bucket.main_bucket.id
  versioning_configuration {
    status = "Enabled"
  }
}

resource "aws_s3_bucket_server_side_encryption_configuration" "main_bucket_encryption" {
  bucket = aws_s3_bucket.main_bucket.id

  rule {
    apply_server_side_encryption_by_default {
      sse_algorithm = "AES256"
    }
  }
}"#;

const EC2_TEMPLATE: &str = r#"# AWS EC2 Instance Configuration
resource "aws_instance" "web_server" {
  ami           = "ami-0c02fb55956c7d316"
  instance_type = "t3.medium"

  vpc_security_group_ids = [aws_security_group.web_sg.id]

  tags = {
    Name = "Web Server"
    Type = "Production"
  }
}

resource "aws_security_group" "web_sg" {
  name_prefix = "web-server-sg"

  ingress {
    from_port   = 80
    to_port     = 80
    protocol    = "tcp"
    cidr_blocks = ["0.0.0.0/0"]
  }

  ingress {
    from_port   = 443
    to_port     = 443
    protocol    = "tcp"
    cidr_blocks = ["0.0.0.0/0"]
  }

  egress {
    from_port   = 0
    to_port     = 0
    protocol    = "-1"
    cidr_blocks = ["0.0.0.0/0"]
  }
}"#;

const AZURE_TEMPLATE: &str = r#"# Azure Infrastructure Template
terraform {
  required_providers {
    azurerm = {
      source  = "hashicorp/azurerm"
      version = "~> 3.0"
    }
  }
}

provider "azurerm" {
  features {}
}

resource "azurerm_resource_group" "example" {
  name     = "example-resources"
  location = "East US"
}"#;

const GCP_TEMPLATE: &str = r#"# Google Cloud Infrastructure Template
terraform {
  required_providers {
    google = {
      source  = "hashicorp/google"
      version = "~> 4.0"
    }
  }
}

provider "google" {
  project = "your-project-id"
  region  = "us-central1"
}

resource "google_compute_instance" "example" {
  name         = "example-instance"
  machine_type = "e2-micro"
  zone         = "us-central1-a"
}"#;

fn aws_generic(prompt: &str) -> String {
    format!(
        r#"# Generated Infrastructure as Code
# Based on your requirements: "{prompt}"

terraform {{
  required_providers {{
    aws = {{
      source  = "hashicorp/aws"
      version = "~> 5.0"
    }}
  }}
}}

provider "aws" {{
  region = "us-west-2"
}}

# Your infrastructure components will be generated here
# Provide more specific requirements for detailed IaC"#
    )
}

/// Canned template used when no API key is configured or the completion
/// request fails. Keyword-matched on the prompt first, then by provider.
pub fn fallback_infrastructure_code(
    prompt: &str,
    provider: Provider,
    flavor: CodeFlavor,
) -> GeneratedCode {
    if flavor != CodeFlavor::Terraform {
        return GeneratedCode {
            code: format!("# {flavor} template for {provider}\n# {prompt}\n# Configure an API key for detailed code generation"),
            explanation: format!(
                "Basic {flavor} template for {provider}. Configure an API key for AI-powered code generation."
            ),
        };
    }

    let lower = prompt.to_lowercase();
    let code = if lower.contains("s3") || lower.contains("storage") {
        S3_TEMPLATE.to_string()
    } else if lower.contains("ec2") || lower.contains("server") {
        EC2_TEMPLATE.to_string()
    } else {
        match provider {
            Provider::Azure => AZURE_TEMPLATE.to_string(),
            Provider::Gcp => GCP_TEMPLATE.to_string(),
            Provider::Aws => aws_generic(prompt),
        }
    };

    GeneratedCode {
        explanation: format!(
            "Basic terraform template for {provider}. Configure an API key for AI-powered code generation."
        ),
        code,
    }
}
